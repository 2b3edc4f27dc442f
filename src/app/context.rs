//! Shared UI state available to every display component.
//!
//! [`MovieContext`] is passed explicitly (it lives inside
//! [`AppState`](super::AppState)); there is no global. The admin flag only decides
//! whether mutation affordances are shown. It is not access control: the backend
//! accepts writes regardless.

use crate::domain::{Movie, MovieInput};

#[derive(Debug, Clone, PartialEq)]
pub struct MovieContext {
    is_admin: bool,
    editing_movie: Option<Movie>,
    show_form: bool,
    draft: Option<MovieInput>,
    form_error: Option<String>,
    submitting: bool,
    delete_target: Option<Movie>,
    deleting: bool,
}

impl Default for MovieContext {
    fn default() -> Self {
        Self::new(true)
    }
}

impl MovieContext {
    #[must_use]
    pub const fn new(is_admin: bool) -> Self {
        Self {
            is_admin,
            editing_movie: None,
            show_form: false,
            draft: None,
            form_error: None,
            submitting: false,
            delete_target: None,
            deleting: false,
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn set_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
    }

    pub fn toggle_admin(&mut self) {
        self.is_admin = !self.is_admin;
    }

    /// The movie the form is editing; `None` while creating or closed.
    #[must_use]
    pub const fn editing_movie(&self) -> Option<&Movie> {
        self.editing_movie.as_ref()
    }

    #[must_use]
    pub const fn show_form(&self) -> bool {
        self.show_form
    }

    /// Last submitted form contents, kept so a failed submit stays populated.
    #[must_use]
    pub const fn draft(&self) -> Option<&MovieInput> {
        self.draft.as_ref()
    }

    #[must_use]
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Opens the form pre-filled with `movie`.
    pub fn handle_edit(&mut self, movie: Movie) {
        self.draft = Some(MovieInput::from_movie(&movie));
        self.editing_movie = Some(movie);
        self.show_form = true;
        self.form_error = None;
        self.submitting = false;
    }

    /// Opens an empty form for a new movie.
    pub fn open_create(&mut self) {
        self.editing_movie = None;
        self.draft = None;
        self.show_form = true;
        self.form_error = None;
        self.submitting = false;
    }

    /// Closes the form and forgets what it was editing.
    pub fn close_form(&mut self) {
        self.editing_movie = None;
        self.draft = None;
        self.show_form = false;
        self.form_error = None;
        self.submitting = false;
    }

    /// Marks a submit as in flight.
    pub fn begin_submit(&mut self, draft: MovieInput) {
        self.draft = Some(draft);
        self.form_error = None;
        self.submitting = true;
    }

    /// Keeps the form open and populated, showing `message` inline.
    pub fn submit_failed(&mut self, message: String) {
        self.submitting = false;
        self.form_error = Some(message);
    }

    /// A successful submit closes the form.
    pub fn submit_succeeded(&mut self) {
        self.close_form();
    }

    #[must_use]
    pub const fn delete_target(&self) -> Option<&Movie> {
        self.delete_target.as_ref()
    }

    #[must_use]
    pub const fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Asks for confirmation before deleting `movie`.
    pub fn request_delete(&mut self, movie: Movie) {
        self.delete_target = Some(movie);
        self.deleting = false;
    }

    /// Confirms the pending delete; returns the id to delete.
    pub fn confirm_delete(&mut self) -> Option<i64> {
        if self.deleting {
            return None;
        }
        let id = self.delete_target.as_ref()?.id;
        self.deleting = true;
        Some(id)
    }

    pub fn cancel_delete(&mut self) {
        self.delete_target = None;
        self.deleting = false;
    }

    /// Clears the confirmation once the delete settled either way.
    pub fn delete_finished(&mut self) {
        self.cancel_delete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn heat() -> Movie {
        Movie {
            id: 7,
            title: "Heat".to_string(),
            director: "Michael Mann".to_string(),
            director_id: None,
            release_year: 1995,
            genre: Some("Crime".to_string()),
            rating: Some(8.3),
            description: None,
            language: None,
            image_url: None,
            created_at: Utc::now(),
            cast: None,
            reviews: None,
        }
    }

    #[test]
    fn admin_defaults_on() {
        assert!(MovieContext::default().is_admin());
    }

    #[test]
    fn edit_then_cancel_clears_editing_movie() {
        let mut context = MovieContext::default();
        context.handle_edit(heat());
        assert!(context.show_form());
        assert_eq!(context.editing_movie().map(|m| m.id), Some(7));
        assert_eq!(context.draft().map(|d| d.title.as_str()), Some("Heat"));

        context.close_form();
        assert!(!context.show_form());
        assert!(context.editing_movie().is_none());
    }

    #[test]
    fn failed_submit_keeps_form_populated() {
        let mut context = MovieContext::default();
        context.handle_edit(heat());
        let mut draft = MovieInput::from_movie(&heat());
        draft.title = "Heat II".to_string();
        context.begin_submit(draft);
        assert!(context.is_submitting());

        context.submit_failed("An error occurred".to_string());
        assert!(context.show_form());
        assert!(!context.is_submitting());
        assert_eq!(context.form_error(), Some("An error occurred"));
        assert_eq!(context.draft().map(|d| d.title.as_str()), Some("Heat II"));
        assert!(context.editing_movie().is_some());
    }

    #[test]
    fn delete_confirmation_is_single_shot() {
        let mut context = MovieContext::default();
        assert_eq!(context.confirm_delete(), None);

        context.request_delete(heat());
        assert_eq!(context.confirm_delete(), Some(7));
        assert_eq!(context.confirm_delete(), None);

        context.delete_finished();
        assert!(context.delete_target().is_none());
    }
}
