use std::path::PathBuf;

use medquest_admin::clients::CloudinaryClient;
use medquest_admin::models::metadata::{ExamMonth, ExamYear};
use medquest_admin::models::taxonomy::{Curriculum, SchoolDirectory, Semester, SubjectYear};
use medquest_admin::services::exam_assembler;
use medquest_admin::services::metadata_normalizer::RawMetadata;
use medquest_admin::utils::logging;
use medquest_admin::workflow::{EditorSession, ExamCtx, PublishFlow};
use medquest_admin::{App, Config, OcrService};

/// Fresh scratch folder for one test
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("medquest_admin_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

/// Full create-exam interaction: metadata form, question editing, import,
/// export — everything short of the network.
#[tokio::test]
async fn create_exam_flow_produces_a_round_trippable_document() {
    logging::init();

    let mut session = EditorSession::new(
        Curriculum::default_curriculum(),
        SchoolDirectory::default_directory(),
        10,
    );

    let raw = RawMetadata {
        school: Some("Sheikh Zayed".to_string()),
        exam_year: Some(ExamYear::Year(2025)),
        exam_month: Some(ExamMonth::January),
        exam_variable: Some(2),
        subject_year: Some(SubjectYear::First),
        semester: Some(Semester::S1),
        topic: Some("Anatomie I".to_string()),
    };
    session.submit_metadata(&raw).expect("metadata submission failed");
    assert!(session.last_warnings().is_empty());

    session.set_question_count(20).expect("resize failed");

    session
        .update_question_text(0, "Which bone forms the orbit's floor?")
        .unwrap();
    session
        .update_options(0, "Maxilla\nFrontal\nSphenoid\nEthmoid")
        .unwrap();
    session.set_correct_answers(0, "A").unwrap();

    let report = session
        .import_questions(
            r#"[{"question": "Imported?", "options": {"A": "yes", "B": "no"}, "correct_answers": ["B"]}]"#,
        )
        .expect("import failed");
    assert_eq!(report.accepted, 1);

    let (json, filename) = session.finalize().expect("finalize failed");
    assert_eq!(
        filename,
        "S1_Sheikh_Zayed_Anatomie_I_2025_January_2.json"
    );

    let reparsed = exam_assembler::parse(&json).expect("round trip failed");
    assert_eq!(reparsed.question_count(), 21);
    assert!(reparsed.content.questions[0].is_answered);
    assert!(reparsed.content.questions[20].is_answered);
}

/// Batch pipeline over a folder: a stale export goes in, a corrected one
/// comes out.
#[tokio::test]
async fn batch_repairs_and_reexports_a_stale_exam_file() {
    logging::init();

    let dir = scratch_dir("batch");
    let input = dir.join("input");
    let export = dir.join("export");
    std::fs::create_dir_all(&input).unwrap();

    // An old export: semester from the wrong year, an answer letter with no
    // option behind it, and a lying answered flag.
    let stale = r#"{
      "metadata": {
        "unique_id": "stale",
        "school": "Fes",
        "exam_year": "2024",
        "exam_month": "May",
        "exam_variable": 1,
        "subject_year": "First Year",
        "semester": "S7",
        "topic": "Pneumologie"
      },
      "content": {
        "questions": [
          {
            "question": "Q1",
            "options": {"A": "x", "B": "y"},
            "correct_answers": ["E"],
            "isAnswered": true
          }
        ]
      }
    }"#;
    std::fs::write(input.join("old_exam.json"), stale).unwrap();

    let mut config = Config::default();
    config.input_folder = input.to_string_lossy().to_string();
    config.export_folder = export.to_string_lossy().to_string();
    config.output_log_file = dir.join("output.txt").to_string_lossy().to_string();
    config.publish_enabled = false;

    let app = App::initialize(config).await.expect("initialize failed");
    app.run().await.expect("batch run failed");

    let corrected = export.join("corrected_old_exam.json");
    assert!(corrected.exists(), "corrected export missing");

    let json = std::fs::read_to_string(&corrected).unwrap();
    let document = exam_assembler::parse(&json).expect("corrected export must parse");

    // Metadata cascaded back into the taxonomy and the id was recomputed.
    assert_eq!(document.metadata.semester, Semester::S1);
    assert_eq!(document.metadata.topic, "Anatomie I");
    assert_eq!(
        document.metadata.unique_id,
        "S1_Fes_Anatomie_I_2024_May_1"
    );

    // Question invariants restored.
    let record = &document.content.questions[0];
    assert!(record.correct_answers.is_empty());
    assert!(!record.is_answered);

    let _ = std::fs::remove_dir_all(&dir);
}

/// An empty input folder is not an error.
#[tokio::test]
async fn batch_with_no_files_finishes_cleanly() {
    logging::init();

    let dir = scratch_dir("empty");
    let input = dir.join("input");
    std::fs::create_dir_all(&input).unwrap();

    let mut config = Config::default();
    config.input_folder = input.to_string_lossy().to_string();
    config.export_folder = dir.join("export").to_string_lossy().to_string();
    config.output_log_file = dir.join("output.txt").to_string_lossy().to_string();

    let app = App::initialize(config).await.expect("initialize failed");
    app.run().await.expect("empty batch must succeed");

    let _ = std::fs::remove_dir_all(&dir);
}

/// Needs real Cloudinary credentials in the environment:
/// `cargo test test_cloudinary_upload -- --ignored --nocapture`
#[tokio::test]
#[ignore]
async fn test_cloudinary_upload() {
    logging::init();

    let config = Config::from_env();
    let client = CloudinaryClient::new(&config);

    // A 1x1 PNG.
    let png: Vec<u8> = vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x62, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    let url = client.upload(png).await.expect("upload failed");
    println!("hosted at: {}", url);
    assert!(url.starts_with("https://"));
}

/// Needs service-account credentials in the environment:
/// `cargo test test_publish_flow -- --ignored --nocapture`
#[tokio::test]
#[ignore]
async fn test_publish_flow() {
    logging::init();

    let config = Config::from_env();
    let flow = PublishFlow::new(&config);

    let mut session = EditorSession::new(
        Curriculum::default_curriculum(),
        SchoolDirectory::default_directory(),
        config.exam_variable_max,
    );
    session
        .submit_metadata(&RawMetadata::default())
        .expect("metadata submission failed");
    session.set_question_count(1).expect("resize failed");

    let document = session.document().expect("no document").clone();
    let ctx = ExamCtx::new(document.export_filename(), 1);

    let outcome = flow
        .run(&document, &document.export_filename(), &ctx)
        .await
        .expect("publish failed");
    println!("stored as {} ({:?})", outcome.file_id, outcome.link);
}

/// Needs a vision-capable model key in the environment:
/// `cargo test test_ocr_structuring -- --ignored --nocapture`
#[tokio::test]
#[ignore]
async fn test_ocr_structuring() {
    logging::init();

    let config = Config::from_env();
    let service = OcrService::new(&config);

    let pages = vec![
        "https://upload.wikimedia.org/wikipedia/commons/3/3a/Exam_paper.jpg".to_string(),
    ];

    let draft = service
        .structure_questions(&pages)
        .await
        .expect("structuring failed");
    println!("draft:\n{}", draft);

    let mut questions = Vec::new();
    let report = exam_assembler::merge_imported_questions(&mut questions, &draft);
    assert!(!report.is_rejected(), "draft must be an array");
}
