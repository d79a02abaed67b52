use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use scoutpit_core::models::YesNo;
use scoutpit_core::paths;
use scoutpit_core::questionnaire::QUESTION_COUNT;
use scoutpit_screens::context::{CurrentUser, Navigator, Route, Theme};
use scoutpit_screens::error::ScreenError;
use scoutpit_screens::survey::{PitSurveyScreen, Widget};
use scoutpit_store::error::StoreError;
use scoutpit_store::memory::MemoryStore;
use scoutpit_store::{RemoteStore, Subscription};

fn scouter(name: &str) -> Option<CurrentUser> {
    Some(CurrentUser {
        username: name.to_string(),
    })
}

#[derive(Default)]
struct RecordingNavigator {
    redirects: Mutex<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: Route) {
        self.redirects.lock().unwrap().push(route);
    }
}

/// Backend whose writes are always rejected.
struct FailingStore;

#[async_trait]
impl RemoteStore for FailingStore {
    async fn get(&self, _path: &str) -> Result<Option<Value>, StoreError> {
        Ok(None)
    }

    async fn set(&self, path: &str, _value: Value) -> Result<(), StoreError> {
        Err(StoreError::Rejected {
            path: path.to_string(),
            reason: "permission denied".to_string(),
        })
    }

    async fn push(&self, path: &str, _value: Value) -> Result<String, StoreError> {
        Err(StoreError::Rejected {
            path: path.to_string(),
            reason: "permission denied".to_string(),
        })
    }

    fn subscribe(&self, _path: &str) -> Subscription {
        let (_tx, rx) = tokio::sync::watch::channel(Value::Null);
        Subscription::new(rx, None)
    }
}

fn mount(
    store: Arc<dyn RemoteStore>,
    user: Option<CurrentUser>,
    entry_team: Option<&str>,
) -> Result<PitSurveyScreen, ScreenError> {
    PitSurveyScreen::mount(
        store,
        user,
        Theme::Light,
        &RecordingNavigator::default(),
        entry_team.map(str::to_string),
    )
}

#[tokio::test]
async fn unauthenticated_mount_redirects_to_login_without_store_access() {
    let store = Arc::new(MemoryStore::new());
    let navigator = RecordingNavigator::default();

    let result = PitSurveyScreen::mount(store.clone(), None, Theme::Light, &navigator, None);

    assert!(matches!(result, Err(ScreenError::AuthRequired)));
    assert_eq!(*navigator.redirects.lock().unwrap(), vec![Route::Login]);
    // Nothing was read or written.
    assert_eq!(store.get("").await.unwrap(), None);
}

#[tokio::test]
async fn entry_team_locks_the_manual_field() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = mount(store, scouter("carol"), Some("254")).unwrap();

    assert_eq!(screen.team_number(), "254");
    assert!(!screen.team_number_editable());

    screen.set_team_number("999");
    assert_eq!(screen.team_number(), "254");
}

#[tokio::test]
async fn manual_team_number_is_the_submission_key() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = mount(store.clone(), scouter("carol"), None).unwrap();

    assert!(screen.team_number_editable());
    assert!(!screen.can_submit());

    screen.set_team_number("118");
    assert!(screen.can_submit());
    screen.submit().await.unwrap();

    assert!(store.get("pitScoutingResults/118").await.unwrap().is_some());
}

#[tokio::test]
async fn empty_team_number_blocks_submission_with_zero_writes() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = mount(store.clone(), scouter("carol"), None).unwrap();

    assert!(!screen.can_submit());
    let err = screen.submit().await.unwrap_err();
    assert!(matches!(err, ScreenError::Validation(_)));
    assert_eq!(store.get("pitScoutingResults").await.unwrap(), None);
}

#[tokio::test]
async fn submitted_answers_cover_all_question_ids_with_empty_defaults() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = mount(store.clone(), scouter("carol"), Some("118")).unwrap();

    screen.submit().await.unwrap();

    let record = store
        .get(&paths::survey_result("118"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record["username"], json!("carol"));

    let answers = record["answers"].as_object().unwrap();
    assert_eq!(answers.len(), QUESTION_COUNT);
    for id in 0..QUESTION_COUNT {
        assert_eq!(answers[&id.to_string()], json!(""));
    }
}

#[tokio::test]
async fn team_118_scenario() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = mount(store.clone(), scouter("carol"), Some("118")).unwrap();

    // Question 1 (yes/no) left unanswered, question 12 (open) answered.
    screen.set_text(12, "straight line auto").unwrap();
    screen.submit().await.unwrap();

    let record = store
        .get(&paths::survey_result("118"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record["answers"]["1"], json!(""));
    assert_eq!(record["answers"]["12"], json!("straight line auto"));
}

#[tokio::test]
async fn scale_answers_are_stored_as_numbers_and_clamped() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = mount(store.clone(), scouter("carol"), Some("118")).unwrap();

    screen.set_scale(0, 1.35).unwrap();
    screen.choose(4, YesNo::Yes).unwrap();
    screen.submit().await.unwrap();

    let record = store
        .get(&paths::survey_result("118"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record["answers"]["0"], json!(1.35));
    assert_eq!(record["answers"]["4"], json!("yes"));

    screen.set_scale(0, 5.0).unwrap();
    screen.submit().await.unwrap();
    let record = store
        .get(&paths::survey_result("118"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record["answers"]["0"], json!(2.0));
}

#[tokio::test]
async fn resubmission_fully_replaces_the_prior_survey() {
    let store = Arc::new(MemoryStore::new());

    let mut first = mount(store.clone(), scouter("carol"), Some("118")).unwrap();
    first.set_text(13, "very fast climb").unwrap();
    first.choose(1, YesNo::Yes).unwrap();
    first.submit().await.unwrap();

    let mut second = mount(store.clone(), scouter("dave"), Some("118")).unwrap();
    second.set_text(12, "two-piece auto").unwrap();
    second.submit().await.unwrap();

    let record = store
        .get(&paths::survey_result("118"))
        .await
        .unwrap()
        .unwrap();
    // Nothing from the first submission survives.
    assert_eq!(record["username"], json!("dave"));
    assert_eq!(record["answers"]["13"], json!(""));
    assert_eq!(record["answers"]["1"], json!(""));
    assert_eq!(record["answers"]["12"], json!("two-piece auto"));
}

#[tokio::test]
async fn widgets_follow_the_question_kinds() {
    let store = Arc::new(MemoryStore::new());
    let screen = mount(store, scouter("carol"), Some("118")).unwrap();

    let form = screen.form();
    assert_eq!(form.len(), QUESTION_COUNT);
    match form[0].widget {
        Widget::Slider {
            min,
            max,
            step,
            default,
        } => {
            assert_eq!(min, 1.0);
            assert_eq!(max, 2.0);
            assert_eq!(step, 0.05);
            assert_eq!(default, 1.0);
        }
        _ => panic!("question 0 should render a slider"),
    }
    assert!(matches!(form[1].widget, Widget::YesNoSelect));
    assert!(matches!(form[12].widget, Widget::MultilineText));
    assert!(form.iter().all(|f| f.answer.is_empty()));
}

#[tokio::test]
async fn answers_must_match_their_question_widget() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = mount(store, scouter("carol"), Some("118")).unwrap();

    assert!(matches!(
        screen.choose(12, YesNo::Yes),
        Err(ScreenError::WidgetMismatch { id: 12 })
    ));
    assert!(matches!(
        screen.set_scale(3, 1.5),
        Err(ScreenError::WidgetMismatch { id: 3 })
    ));
    assert!(matches!(
        screen.set_text(0, "tall"),
        Err(ScreenError::WidgetMismatch { id: 0 })
    ));
    assert!(matches!(screen.choose(99, YesNo::No), Err(ScreenError::Core(_))));
}

#[tokio::test]
async fn rejected_write_preserves_the_form() {
    let store = Arc::new(FailingStore);
    let mut screen = mount(store, scouter("carol"), Some("118")).unwrap();
    screen.set_text(12, "straight line auto").unwrap();

    let err = screen.submit().await.unwrap_err();
    assert!(matches!(err, ScreenError::Store(_)));
    assert!(!screen.is_submitting());

    // The answer is still there for a retry.
    let form = screen.form();
    assert_eq!(
        form[12].answer,
        scoutpit_core::models::Answer::Text("straight line auto".to_string())
    );
}

#[tokio::test]
async fn successful_submission_keeps_the_form_and_stays_on_screen() {
    let store = Arc::new(MemoryStore::new());
    let mut screen = mount(store, scouter("carol"), Some("118")).unwrap();
    screen.choose(2, YesNo::No).unwrap();

    screen.submit().await.unwrap();

    assert!(screen.can_submit());
    let form = screen.form();
    assert!(!form[2].answer.is_empty());
}
