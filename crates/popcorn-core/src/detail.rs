use popcorn_models::MovieDetail;

/// Title shown while no detail view is open
pub const DEFAULT_VIEW_TITLE: &str = "usePopcorn";

pub fn detail_view_title(title: &str) -> String {
    format!("Movie | {}", title)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailState {
    pub movie: Option<MovieDetail>,
    pub is_loading: bool,
}

/// Side effects tied to the detail view being open, owned by whatever renders it.
pub trait ViewHooks: Send {
    fn on_enter_detail(&mut self, _title: &str) {}
    fn on_leave_detail(&mut self) {}
}

pub struct NoopHooks;

impl ViewHooks for NoopHooks {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_view_title() {
        assert_eq!(detail_view_title("Inception"), "Movie | Inception");
    }
}
