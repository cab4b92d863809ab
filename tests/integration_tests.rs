//! Integration tests for the resume screener

use resume_screener::board::{JobBoard, JobCatalog};
use resume_screener::config::Config;
use resume_screener::input::InputManager;
use resume_screener::output::{CandidateListing, ReportGenerator};
use resume_screener::processing::Screener;
use resume_screener::queue::{AnalysisQueue, QueueSummary};
use resume_screener::store::{AnalysisStore, CandidateRecord, CandidateStore, InsertOutcome};
use resume_screener::ScreenerError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

fn screener() -> Screener {
    Screener::from_config(&Config::default()).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let extracted = manager.extract(path).await.unwrap();
    assert_eq!(extracted.pages, 1);

    let text = extracted.text;
    assert!(text.contains("John Doe"));
    assert!(text.contains("React"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.xyz");
    std::fs::write(&path, "John Doe").unwrap();

    let mut manager = InputManager::new();
    let result = manager.extract_text(&path).await;
    assert!(matches!(result, Err(ScreenerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(matches!(result, Err(ScreenerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_screen_sample_resume_against_preset() {
    let screener = screener();
    let mut input = InputManager::new();

    let report = screener
        .screen(
            &mut input,
            Path::new("tests/fixtures/sample_resume.txt"),
            Some("Software Engineer"),
        )
        .await;

    let profile = &report.profile;
    assert_eq!(profile.name, "John Doe");
    assert_eq!(profile.email, "john.doe@example.com");
    assert_eq!(profile.mobile, "+15551234567");
    for skill in ["react", "node.js", "docker", "python", "git"] {
        assert!(profile.skills.contains(&skill.to_string()), "missing {}", skill);
    }

    assert_eq!(report.score.matched_core, 2);
    assert_eq!(report.score.section_hits, 4);
    // core 20 + structure 20 + breadth 5
    assert_eq!(report.total_score(), 45);
    assert_eq!(report.recommended_skills, vec!["c++", "java", "testing"]);
    assert!(report.resume_path.ends_with("sample_resume.txt"));
}

#[tokio::test]
async fn test_screen_with_job_description_file() {
    let screener = screener();
    let mut input = InputManager::new();
    let job = input
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let report = screener
        .screen(&mut input, Path::new("tests/fixtures/sample_resume.txt"), Some(&job))
        .await;

    assert!(report.job_skills.preset.is_none());
    assert!(report.job_skills.core.contains("postgresql"));
    assert!(report.recommended_skills.contains(&"postgresql".to_string()));
    assert!(report.total_score() <= 100);
}

#[tokio::test]
async fn test_unreadable_resume_yields_empty_profile() {
    let screener = screener();
    let mut input = InputManager::new();

    let report = screener
        .screen(&mut input, Path::new("tests/fixtures/nonexistent.pdf"), None)
        .await;

    assert_eq!(report.profile.name, "Unknown");
    assert!(report.profile.skills.is_empty());
    assert_eq!(report.profile.pages, 0);
}

#[tokio::test]
async fn test_candidate_store_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("candidates.json");
    let screener = screener();
    let mut input = InputManager::new();

    let txt = screener
        .screen(&mut input, Path::new("tests/fixtures/sample_resume.txt"), Some("Web Developer"))
        .await;
    let md = screener
        .screen(&mut input, Path::new("tests/fixtures/sample_resume.md"), Some("Web Developer"))
        .await;

    let mut store = CandidateStore::open(&store_path).await.unwrap();
    assert_eq!(store.insert_unique(CandidateRecord::from_report(&txt)), InsertOutcome::Inserted(1));
    // same email, so the second resume is not stored
    assert_eq!(
        store.insert_unique(CandidateRecord::from_report(&md)),
        InsertOutcome::Duplicate { existing_id: 1 }
    );
    store.save().await.unwrap();

    let reopened = CandidateStore::open(&store_path).await.unwrap();
    let ranked = reopened.ranked(Some("Web Developer"));
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].name, "John Doe");
    assert!(reopened.ranked(Some("Data Scientist")).is_empty());

    let listing = CandidateListing::new(None, reopened.ranked(None));
    let generator = ReportGenerator::with_options(false, true);
    let output = generator
        .formatter(resume_screener::config::OutputFormat::Console)
        .format_candidates(&listing)
        .unwrap();
    assert!(output.contains("John Doe"));
}

#[tokio::test]
async fn test_job_board_queue_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let board = Arc::new(JobBoard::load(Path::new("tests/fixtures/board.json")).await.unwrap());
    assert_eq!(board.active_postings().count(), 1);

    let store = Arc::new(Mutex::new(
        AnalysisStore::open(&dir.path().join("analyses.json")).await.unwrap(),
    ));
    let catalog: Arc<dyn JobCatalog> = board.clone();
    let queue = AnalysisQueue::start(Arc::new(screener()), catalog, Arc::clone(&store));

    for application in board.pending_applications() {
        queue.process_application(board.as_ref(), application.id).unwrap();
    }
    let summary = queue.shutdown().await.unwrap();

    assert_eq!(
        summary,
        QueueSummary {
            processed: 1,
            skipped: 1,
            failed: 0
        }
    );

    let store = store.lock().await;
    let ranked = store.ranked_for_job(1);
    assert_eq!(ranked.len(), 1);

    let analysis = &ranked[0].analysis;
    assert_eq!(ranked[0].application_id, 100);
    assert_eq!(analysis.missing_skills, vec!["kubernetes", "postgresql"]);
    assert!(analysis.matched_skills.contains(&"react".to_string()));
    assert!(analysis.match_percentage > 50.0 && analysis.match_percentage < 100.0);
    assert_eq!(ranked[0].recommended_skills, vec!["kubernetes", "postgresql"]);
    assert!(ranked[0].score <= 100);
}
