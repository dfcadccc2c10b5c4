//! Batch exam processor - orchestration layer
//!
//! ## Responsibilities
//!
//! The application entry point: loads reference data, scans the input
//! folder, and walks every exam file through the repair pipeline.
//!
//! 1. **Initialization**: session log file, banners, curriculum + school
//!    directory, publish flow when enabled
//! 2. **Batch loading**: every `*.json` exam in the input folder
//! 3. **Sequential processing**: one operator, one document at a time —
//!    files are processed in order, never concurrently
//! 4. **Statistics**: per-file outcomes summed into a final banner
//!
//! ## Layering
//!
//! ```text
//! batch_processor (Vec<LoadedExam>)
//!     ↓
//! exam_processor (one exam file)
//!     ↓
//! workflow::EditorSession / workflow::PublishFlow (one document)
//!     ↓
//! services (capabilities: normalize / parse / repair / assemble)
//!     ↓
//! clients (Cloudinary / Drive / Sheets / OCR model)
//! ```

use anyhow::Result;
use tokio::fs;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::loaders;
use crate::models::taxonomy::{Curriculum, SchoolDirectory};
use crate::orchestrator::exam_processor;
use crate::utils::logging::{init_log_file, log_exams_loaded, log_startup, print_final_stats};
use crate::workflow::{ExamCtx, PublishFlow};

/// Application
pub struct App {
    config: Config,
    curriculum: Curriculum,
    schools: SchoolDirectory,
    publish_flow: Option<PublishFlow>,
}

impl App {
    /// Initialize the application
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;
        log_startup(&config.input_folder, config.publish_enabled);

        let curriculum = loaders::load_curriculum_or_default(&config.curriculum_file).await;
        let schools = loaders::load_schools_or_default(&config.schools_file).await;

        let publish_flow = if config.publish_enabled {
            Some(PublishFlow::new(&config))
        } else {
            None
        };

        Ok(Self {
            config,
            curriculum,
            schools,
            publish_flow,
        })
    }

    /// Run the batch
    pub async fn run(&self) -> Result<()> {
        info!("\n📁 scanning for exam files...");
        let all_exams = loaders::load_all_exam_files(&self.config.input_folder).await?;

        if all_exams.is_empty() {
            warn!("⚠️ no exam JSON files found, nothing to do");
            return Ok(());
        }

        let total = all_exams.len();
        log_exams_loaded(total);

        fs::create_dir_all(&self.config.export_folder).await?;

        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        for (idx, loaded) in all_exams.into_iter().enumerate() {
            let ctx = ExamCtx::new(loaded.file_name.clone(), idx + 1);
            info!("\n{}", "─".repeat(60));

            match exam_processor::process_exam(
                loaded,
                &ctx,
                &self.curriculum,
                &self.schools,
                &self.config,
                self.publish_flow.as_ref(),
            )
            .await
            {
                Ok(exam_stats) => {
                    stats.success += 1;
                    stats.warnings += exam_stats.warnings;
                    stats.repaired += exam_stats.repaired;
                }
                Err(e) => {
                    error!("{} ❌ processing failed: {:#}", ctx, e);
                    stats.failed += 1;
                }
            }
        }

        if stats.warnings > 0 || stats.repaired > 0 {
            info!(
                "\n⚠️ normalized {} metadata field(s), repaired {} question(s) across the batch",
                stats.warnings, stats.repaired
            );
        }

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(())
    }
}

/// Batch statistics
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
    warnings: usize,
    repaired: usize,
}
