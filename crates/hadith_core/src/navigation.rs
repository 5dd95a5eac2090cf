//! crates/hadith_core/src/navigation.rs
//!
//! The view selector and its back-navigation history.

/// Every screen the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    SearchResults,
    Detail,
    BookView,
    Favorites,
    Sources,
    Figures,
    FigureDetail,
    About,
    Login,
    Register,
    Dashboard,
}

impl View {
    /// List-type views. Returning to one of these clears any selection.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            View::Home | View::SearchResults | View::Sources | View::Figures
        )
    }
}

/// Result of a back navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackStep {
    pub view: View,
    /// The caller must drop selected hadith/book/figure and AI results.
    pub clear_selection: bool,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: View,
    history: Vec<View>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(View::Home)
    }
}

impl Navigator {
    pub fn new(start: View) -> Self {
        Self {
            current: start,
            history: vec![start],
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn history(&self) -> &[View] {
        &self.history
    }

    /// Moves forward to `view`, recording it in the history.
    /// Navigating to the view already shown does nothing.
    pub fn navigate(&mut self, view: View) {
        if self.current == view {
            return;
        }
        self.history.push(view);
        self.current = view;
    }

    /// Replaces the whole history with a single view.
    pub fn reset(&mut self, view: View) {
        self.current = view;
        self.history = vec![view];
    }

    /// Pops the history. With nothing to pop, falls back to home.
    pub fn back(&mut self) -> BackStep {
        if self.history.len() > 1 {
            self.history.pop();
            let view = *self.history.last().unwrap_or(&View::Home);
            self.current = view;
            BackStep {
                view,
                clear_selection: view.is_list(),
            }
        } else {
            self.reset(View::Home);
            BackStep {
                view: View::Home,
                clear_selection: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigating_to_the_same_view_does_not_grow_history() {
        let mut nav = Navigator::default();
        nav.navigate(View::Sources);
        nav.navigate(View::Sources);
        assert_eq!(nav.history(), [View::Home, View::Sources]);
    }

    #[test]
    fn back_to_a_list_view_clears_selection() {
        let mut nav = Navigator::default();
        nav.navigate(View::SearchResults);
        nav.navigate(View::Detail);

        let step = nav.back();
        assert_eq!(step.view, View::SearchResults);
        assert!(step.clear_selection);
        assert_eq!(nav.current(), View::SearchResults);
    }

    #[test]
    fn back_to_a_detail_type_view_keeps_selection() {
        let mut nav = Navigator::default();
        nav.navigate(View::Sources);
        nav.navigate(View::BookView);
        nav.navigate(View::Detail);

        let step = nav.back();
        assert_eq!(step.view, View::BookView);
        assert!(!step.clear_selection);
    }

    #[test]
    fn back_at_root_resets_to_home() {
        let mut nav = Navigator::new(View::Login);
        let step = nav.back();
        assert_eq!(step.view, View::Home);
        assert_eq!(nav.history(), [View::Home]);
    }
}
