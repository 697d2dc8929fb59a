//! Static route table

use super::forms::FormKind;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Login,
    Signup,
    AddFormation,
    AddStage,
    AddRealisation,
    AddPartenaire,
    AddService,
}

impl View {
    /// Routes listed on the home screen, in menu order
    pub const ROUTES: [View; 7] = [
        View::Login,
        View::Signup,
        View::AddFormation,
        View::AddStage,
        View::AddRealisation,
        View::AddPartenaire,
        View::AddService,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::AddFormation => "/add-formation",
            Self::AddStage => "/add-stage",
            Self::AddRealisation => "/add-realisation",
            Self::AddPartenaire => "/add-partenaire",
            Self::AddService => "/add-service",
        }
    }

    /// Resolve a path. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        std::iter::once(Self::Home)
            .chain(Self::ROUTES)
            .find(|view| view.path() == normalized)
    }

    /// The form rendered by this view
    pub fn form_kind(&self) -> Option<FormKind> {
        match self {
            Self::Home => None,
            Self::Login => Some(FormKind::Login),
            Self::Signup => Some(FormKind::Signup),
            Self::AddFormation => Some(FormKind::Formation),
            Self::AddStage => Some(FormKind::Stage),
            Self::AddRealisation => Some(FormKind::Realisation),
            Self::AddPartenaire => Some(FormKind::Partenaire),
            Self::AddService => Some(FormKind::Service),
        }
    }

    pub fn is_form_view(&self) -> bool {
        self.form_kind().is_some()
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Login => "Login",
            Self::Signup => "Signup",
            Self::AddFormation => "Formation",
            Self::AddStage => "Stage",
            Self::AddRealisation => "Realisation",
            Self::AddPartenaire => "Partenaire",
            Self::AddService => "Service",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_resolves_to_itself() {
        for view in View::ROUTES {
            assert_eq!(View::from_path(view.path()), Some(view));
        }
    }

    #[test]
    fn test_trailing_slash_and_root() {
        assert_eq!(View::from_path("/add-stage/"), Some(View::AddStage));
        assert_eq!(View::from_path("/"), Some(View::Home));
        assert_eq!(View::from_path(""), Some(View::Home));
    }

    #[test]
    fn test_unknown_path() {
        assert_eq!(View::from_path("/add-contact"), None);
        assert_eq!(View::from_path("add-stage"), None);
    }

    #[test]
    fn test_form_kind_mapping() {
        assert_eq!(View::Home.form_kind(), None);
        assert_eq!(View::AddFormation.form_kind(), Some(FormKind::Formation));
        assert_eq!(View::Signup.form_kind(), Some(FormKind::Signup));
        assert!(!View::Home.is_form_view());
        assert!(View::AddService.is_form_view());
    }
}
