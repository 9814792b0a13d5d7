use std::sync::Arc;

use internship_admin::client::{ApiConfig, HttpInternshipApi, InternshipApi};
use internship_admin::models::PositionTemplate;
use internship_admin::services::{BatchCapacity, BulkSubmitter, PositionService, bulk};
use internship_admin::AppError;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bulk-create numbered internship positions in a batch
#[derive(Debug, Parser)]
#[command(name = "internship-admin")]
#[command(about = "Creates numbered internship positions in a batch", long_about = None)]
struct Args {
    /// Batch receiving the positions
    batch_id: i64,

    /// Company offering the positions
    company_id: i64,

    /// Title prefix; positions are named "<job_title> 1" .. "<job_title> N"
    job_title: String,

    /// Number of positions to create
    quantity: u32,

    /// Submit to the backend instead of printing a dry run
    #[arg(long)]
    apply: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "internship_admin=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ApiConfig::new_from_env()?;
    let submitter = BulkSubmitter::new(config.bulk_delay);
    let api: Arc<dyn InternshipApi> = Arc::new(HttpInternshipApi::new(config)?);

    let batch = api.fetch_batch(args.batch_id).await?;
    let capacity = BatchCapacity::of(&batch);
    info!(
        "Batch {} '{}': {}/{} students, {} slots remaining",
        batch.id,
        batch.name,
        capacity.current_students,
        capacity.max_students,
        capacity.remaining_slots()
    );

    let template = PositionTemplate {
        job_title: args.job_title.trim().to_string(),
        description: None,
        start_date: batch.start_date,
        end_date: batch.end_date,
        batch_id: batch.id,
        company_id: args.company_id,
        teacher_id: None,
        salary: None,
        working_hours_per_week: None,
    };

    if !args.apply {
        capacity.validate_quantity(args.quantity)?;
        for request in bulk::generate(&template, args.quantity) {
            println!("[DRY RUN] Would create '{}'", request.job_title);
        }
        println!("Run again with --apply to create {} positions", args.quantity);
        return Ok(());
    }

    let service = PositionService::new(api, submitter);
    match service.create_positions(args.batch_id, &template, args.quantity).await {
        Ok(created) => println!("Created {} / {} positions", created, args.quantity),
        Err(AppError::BulkInterrupted { succeeded, remaining, source }) => {
            println!("Created {} / {} positions", succeeded, args.quantity);
            println!("Stopped with {} not attempted: {}", remaining, source);
            let source: Box<dyn std::error::Error> = source;
            return Err(source);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
