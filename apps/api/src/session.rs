//! Per-session in-memory state.
//!
//! A session holds the current form fields and settings plus the memoized summary.
//! `ResumeData` is rebuilt from the fields on every render; the summary is the only
//! value that survives across renders. Sessions never share state and are lost on restart.
//! A session left unmodified for longer than the store's TTL is evicted lazily, on the
//! next lookup or creation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

use crate::cover_letter::templated_cover_letter;
use crate::errors::AppError;
use crate::models::resume::{
    Contact, Education, Experience, FontChoice, ResumeData, Style, Template, Theme,
    MAX_EDUCATIONS, MAX_EXPERIENCES, MIN_EDUCATIONS, MIN_EXPERIENCES,
};
use crate::render::PreviewOptions;

// ────────────────────────────────────────────────────────────────────────────
// Session data
// ────────────────────────────────────────────────────────────────────────────

/// Everything the user types in. Replaced wholesale on each form update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeForm {
    pub contact: Contact,
    pub skills: String,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
    pub projects: String,
    pub cover_letter: String,
}

impl Default for ResumeForm {
    fn default() -> Self {
        Self {
            contact: Contact::default(),
            skills: String::new(),
            experiences: vec![Experience::default(); MIN_EXPERIENCES],
            educations: vec![Education::default(); MIN_EDUCATIONS],
            projects: String::new(),
            cover_letter: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub template: Template,
    pub theme: Theme,
    pub font: FontChoice,
    /// Preview styling only; exports ignore it.
    pub dark_mode: bool,
}

impl Settings {
    pub fn style(&self) -> Style {
        Style {
            template: self.template,
            theme: self.theme,
            font: self.font,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub form: ResumeForm,
    pub settings: Settings,
    /// Set once per session (AI text or fallback) and kept until explicitly cleared.
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Held for the whole of a summary generation so one session never has two in flight.
    #[serde(skip)]
    summary_guard: Arc<Mutex<()>>,
}

impl Session {
    pub fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            form: ResumeForm::default(),
            settings: Settings::default(),
            summary: None,
            created_at: now,
            updated_at: now,
            summary_guard: Arc::default(),
        }
    }

    /// Shared with every snapshot of this session.
    pub fn summary_guard(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.summary_guard)
    }

    /// Assembles a fresh `ResumeData` from the current fields.
    pub fn resume_data(&self) -> ResumeData {
        ResumeData {
            contact: self.form.contact.clone(),
            skills: self.form.skills.clone(),
            summary: self.summary.clone().unwrap_or_default(),
            experiences: self.form.experiences.clone(),
            educations: self.form.educations.clone(),
            projects: self.form.projects.clone(),
            cover_letter: self.form.cover_letter.clone(),
            style: self.settings.style(),
        }
    }

    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            dark_mode: self.settings.dark_mode,
        }
    }

    /// Replaces the form. Entry counts outside the input bounds are rejected.
    pub fn replace_form(&mut self, form: ResumeForm) -> Result<(), AppError> {
        check_count("experiences", form.experiences.len(), MIN_EXPERIENCES, MAX_EXPERIENCES)?;
        check_count("educations", form.educations.len(), MIN_EDUCATIONS, MAX_EDUCATIONS)?;
        self.form = form;
        self.touch();
        Ok(())
    }

    /// Resizes the entry slots, clamped to the input bounds. Existing entries keep
    /// their order; new slots are empty.
    pub fn resize_entries(&mut self, experiences: usize, educations: usize) {
        self.form.experiences.resize(
            experiences.clamp(MIN_EXPERIENCES, MAX_EXPERIENCES),
            Experience::default(),
        );
        self.form.educations.resize(
            educations.clamp(MIN_EDUCATIONS, MAX_EDUCATIONS),
            Education::default(),
        );
        self.touch();
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.touch();
    }

    /// Returns the skills text to summarise, once name and skills are both filled in.
    pub fn summary_skills(&self) -> Result<String, AppError> {
        if self.form.contact.name.trim().is_empty() || self.form.skills.trim().is_empty() {
            return Err(AppError::Validation(
                "name and skills are required before generating a summary".to_string(),
            ));
        }
        Ok(self.form.skills.clone())
    }

    /// Stores `text` unless a summary is already memoized; returns whichever is kept.
    pub fn remember_summary(&mut self, text: String) -> &str {
        if self.summary.is_none() {
            self.summary = Some(text);
            self.touch();
        }
        self.summary.as_deref().unwrap_or_default()
    }

    pub fn clear_summary(&mut self) {
        self.summary = None;
        self.touch();
    }

    /// Replaces the cover letter with the template, signed with the current name.
    pub fn apply_cover_letter_template(&mut self) -> &str {
        self.form.cover_letter = templated_cover_letter(&self.form.contact.name);
        self.touch();
        &self.form.cover_letter
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn is_idle(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        (now - self.updated_at)
            .to_std()
            .is_ok_and(|idle| idle > ttl)
    }
}

fn check_count(field: &str, len: usize, min: usize, max: usize) -> Result<(), AppError> {
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must have between {min} and {max} entries, got {len}"
        )))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Sessions keyed by id. Cloning shares the same underlying map.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::default(),
            ttl,
        }
    }

    /// Inserts a fresh session, sweeping out idle ones first.
    pub async fn create(&self) -> Session {
        let session = Session::new(Uuid::new_v4());
        let mut sessions = self.inner.write().await;
        self.evict_idle(&mut sessions);
        sessions.insert(session.id, session.clone());
        info!("Created session {} ({} live)", session.id, sessions.len());
        session
    }

    /// Snapshot of a session.
    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        let mut sessions = self.inner.write().await;
        self.live_session(&mut sessions, id).map(|s| s.clone())
    }

    /// Runs `f` against the stored session under the write lock.
    pub async fn update<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut sessions = self.inner.write().await;
        let session = self.live_session(&mut sessions, id)?;
        f(session)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| info!("Removed session {id}"))
            .ok_or_else(|| not_found(id))
    }

    /// Looks up `id`, dropping it first if it has gone idle.
    fn live_session<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, Session>,
        id: Uuid,
    ) -> Result<&'a mut Session, AppError> {
        if sessions
            .get(&id)
            .is_some_and(|s| s.is_idle(self.ttl, Utc::now()))
        {
            sessions.remove(&id);
            info!("Evicted idle session {id}");
        }
        sessions.get_mut(&id).ok_or_else(|| not_found(id))
    }

    fn evict_idle(&self, sessions: &mut HashMap<Uuid, Session>) {
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_idle(self.ttl, now));
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {evicted} idle session(s)");
        }
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ResumeForm {
        ResumeForm {
            contact: Contact {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                ..Contact::default()
            },
            skills: "Python, SQL".to_string(),
            ..ResumeForm::default()
        }
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(Uuid::new_v4());
        let data = session.resume_data();
        assert_eq!(data.experiences.len(), 1);
        assert_eq!(data.educations.len(), 1);
        assert_eq!(data.summary, "");
        assert_eq!(data.style, Style::default());
        assert!(!session.preview_options().dark_mode);
    }

    #[test]
    fn test_replace_form_rejects_out_of_range_counts() {
        let mut session = Session::new(Uuid::new_v4());

        let mut form = filled_form();
        form.experiences = vec![Experience::default(); 6];
        assert!(matches!(session.replace_form(form), Err(AppError::Validation(_))));

        let mut form = filled_form();
        form.educations = Vec::new();
        assert!(matches!(session.replace_form(form), Err(AppError::Validation(_))));

        assert_eq!(session.form, ResumeForm::default());
    }

    #[test]
    fn test_resize_clamps_and_preserves_entries() {
        let mut session = Session::new(Uuid::new_v4());
        session.form.experiences[0].job_title = "Engineer".to_string();

        session.resize_entries(9, 0);
        assert_eq!(session.form.experiences.len(), MAX_EXPERIENCES);
        assert_eq!(session.form.experiences[0].job_title, "Engineer");
        assert_eq!(session.form.experiences[4], Experience::default());
        assert_eq!(session.form.educations.len(), MIN_EDUCATIONS);

        session.resize_entries(2, 3);
        assert_eq!(session.form.experiences.len(), 2);
        assert_eq!(session.form.educations.len(), 3);
    }

    #[test]
    fn test_summary_requires_name_and_skills() {
        let mut session = Session::new(Uuid::new_v4());
        assert!(session.summary_skills().is_err());
        session.replace_form(filled_form()).unwrap();
        assert_eq!(session.summary_skills().unwrap(), "Python, SQL");
    }

    #[test]
    fn test_summary_is_memoized_until_cleared() {
        let mut session = Session::new(Uuid::new_v4());
        assert_eq!(session.remember_summary("first".to_string()), "first");
        assert_eq!(session.remember_summary("second".to_string()), "first");

        // Editing the form keeps the memo.
        session.replace_form(filled_form()).unwrap();
        assert_eq!(session.resume_data().summary, "first");

        session.clear_summary();
        assert_eq!(session.remember_summary("second".to_string()), "second");
    }

    #[test]
    fn test_cover_letter_template_uses_name() {
        let mut session = Session::new(Uuid::new_v4());
        session.replace_form(filled_form()).unwrap();
        let letter = session.apply_cover_letter_template().to_string();
        assert!(letter.ends_with("Sincerely,\nJane Doe"));
        assert_eq!(session.resume_data().cover_letter, letter);
    }

    #[test]
    fn test_settings_flow_into_style() {
        let mut session = Session::new(Uuid::new_v4());
        session.apply_settings(Settings {
            template: Template::Classic,
            theme: Theme::Green,
            font: FontChoice::Calibri,
            dark_mode: true,
        });
        let style = session.resume_data().style;
        assert_eq!(style.template, Template::Classic);
        assert_eq!(style.theme, Theme::Green);
        assert_eq!(style.font, FontChoice::Calibri);
        assert!(session.preview_options().dark_mode);
    }

    #[tokio::test]
    async fn test_store_isolates_sessions() {
        let store = SessionStore::default();
        let a = store.create().await;
        let b = store.create().await;

        store
            .update(a.id, |s| {
                s.remember_summary("for a".to_string());
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(store.get(a.id).await.unwrap().summary.as_deref(), Some("for a"));
        assert_eq!(store.get(b.id).await.unwrap().summary, None);
    }

    fn backdate(session: &mut Session, secs: i64) {
        session.updated_at = Utc::now() - chrono::Duration::seconds(secs);
    }

    #[tokio::test]
    async fn test_idle_session_is_evicted_on_lookup() {
        let store = SessionStore::new(Duration::from_secs(60));
        let idle = store.create().await;
        let active = store.create().await;
        store
            .update(idle.id, |s| {
                backdate(s, 120);
                Ok(())
            })
            .await
            .unwrap();

        assert!(matches!(store.get(idle.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            store.update(idle.id, |_| Ok(())).await,
            Err(AppError::NotFound(_))
        ));
        assert!(store.get(active.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_create_sweeps_idle_sessions() {
        let store = SessionStore::new(Duration::from_secs(60));
        let idle = store.create().await;
        let recent = store.create().await;
        store
            .update(idle.id, |s| {
                backdate(s, 120);
                Ok(())
            })
            .await
            .unwrap();
        store
            .update(recent.id, |s| {
                backdate(s, 30);
                Ok(())
            })
            .await
            .unwrap();

        let fresh = store.create().await;
        let sessions = store.inner.read().await;
        assert_eq!(sessions.len(), 2);
        assert!(!sessions.contains_key(&idle.id));
        assert!(sessions.contains_key(&recent.id));
        assert!(sessions.contains_key(&fresh.id));
    }

    #[test]
    fn test_idle_is_measured_from_last_change() {
        let mut session = Session::new(Uuid::new_v4());
        let ttl = Duration::from_secs(60);
        assert!(!session.is_idle(ttl, Utc::now()));
        backdate(&mut session, 120);
        assert!(session.is_idle(ttl, Utc::now()));
        session.apply_settings(Settings::default());
        assert!(!session.is_idle(ttl, Utc::now()));
    }

    #[tokio::test]
    async fn test_store_missing_session_is_not_found() {
        let store = SessionStore::default();
        let id = Uuid::new_v4();
        assert!(matches!(store.get(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.remove(id).await, Err(AppError::NotFound(_))));

        let session = store.create().await;
        store.remove(session.id).await.unwrap();
        assert!(store.get(session.id).await.is_err());
    }
}
