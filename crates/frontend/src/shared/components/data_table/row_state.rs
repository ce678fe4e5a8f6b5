/// Number of placeholder rows shown while loading
pub const SKELETON_ROWS: usize = 5;

/// Which of the three mutually exclusive bodies the table shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    Skeleton,
    Empty,
    Rows,
}

impl BodyState {
    /// Loading wins over everything else
    pub fn resolve(loading: bool, row_count: usize) -> Self {
        if loading {
            BodyState::Skeleton
        } else if row_count == 0 {
            BodyState::Empty
        } else {
            BodyState::Rows
        }
    }
}

/// Hovered row tracking. The only state the table keeps between renders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    hovered: Option<usize>,
}

impl HoverState {
    pub fn enter(&mut self, index: usize) {
        self.hovered = Some(index);
    }

    pub fn leave(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Hover highlight overrides the parity stripe
    pub fn row_class(&self, index: usize) -> &'static str {
        if self.hovered == Some(index) {
            "data-table__row data-table__row--hover"
        } else if index % 2 == 0 {
            "data-table__row data-table__row--even"
        } else {
            "data-table__row data-table__row--odd"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_state_precedence() {
        assert_eq!(BodyState::resolve(true, 0), BodyState::Skeleton);
        assert_eq!(BodyState::resolve(true, 12), BodyState::Skeleton);
        assert_eq!(BodyState::resolve(false, 0), BodyState::Empty);
        assert_eq!(BodyState::resolve(false, 3), BodyState::Rows);
    }

    #[test]
    fn test_parity_classes() {
        let hover = HoverState::default();
        assert!(hover.row_class(0).ends_with("--even"));
        assert!(hover.row_class(1).ends_with("--odd"));
        assert!(hover.row_class(2).ends_with("--even"));
    }

    #[test]
    fn test_enter_then_leave_restores_parity() {
        let mut hover = HoverState::default();
        hover.enter(2);
        assert_eq!(hover.hovered(), Some(2));
        assert!(hover.row_class(2).ends_with("--hover"));
        assert!(hover.row_class(3).ends_with("--odd"));

        hover.leave();
        assert_eq!(hover.hovered(), None);
        assert!(hover.row_class(2).ends_with("--even"));
    }

    #[test]
    fn test_hover_moves_between_rows() {
        let mut hover = HoverState::default();
        hover.enter(1);
        hover.enter(4);
        assert!(hover.row_class(1).ends_with("--odd"));
        assert!(hover.row_class(4).ends_with("--hover"));
    }
}
