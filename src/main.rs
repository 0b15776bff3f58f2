use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use kredit_ai::config::AppConfig;
use kredit_ai::error::AppError;
use kredit_ai::telemetry;
use kredit_ai::workflows::credit::applications::{
    application_router, AnalysisRequest, CreditApplicationService, InMemoryRepository,
    TracingNotifier,
};
use kredit_ai::workflows::credit::analysis::SignalLexicon;
use kredit_ai::workflows::credit::report::{
    ComplianceAlertView, RoleLoadEntry, StageProgressEntry, TaskSnapshotView,
};
use kredit_ai::workflows::credit::{
    ReviewReport, ReviewWorkflowBlueprint, ReviewWorkflowInstance, TaskDetailView,
};
use kredit_ai::workflows::tracker::TrackerReviewImporter;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Kredit AI",
    about = "Run the cooperative credit intake and analysis service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the 5C review workflow for an application
    Review {
        #[command(subcommand)]
        command: ReviewCommand,
    },
    /// Run the recommendation synthesizer on a saved analysis request
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum ReviewCommand {
    /// Generate a 5C review report and optional task listing
    Report(ReviewReportArgs),
}

#[derive(Args, Debug)]
struct ReviewReportArgs {
    /// Application submission date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    submission_date: NaiveDate,
    /// Target committee decision date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    target_decision: NaiveDate,
    /// Evaluation date for the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
    /// Optional committee tracker CSV export to hydrate task progress
    #[arg(long)]
    tracker_csv: Option<PathBuf>,
    /// Include a full task listing in the output
    #[arg(long)]
    list_tasks: bool,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// JSON file containing the analysis request
    request: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ReviewReportRequest {
    #[serde(deserialize_with = "deserialize_date")]
    submission_date: NaiveDate,
    #[serde(deserialize_with = "deserialize_date")]
    target_decision: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    today: Option<NaiveDate>,
    #[serde(default)]
    include_tasks: bool,
    #[serde(default)]
    tracker_csv: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReviewReportResponse {
    submission_date: NaiveDate,
    target_decision: NaiveDate,
    today: NaiveDate,
    data_source: ReviewDataSource,
    stage_progress: Vec<StageProgressEntry>,
    role_load: Vec<RoleLoadEntry>,
    overdue_tasks: Vec<TaskSnapshotView>,
    compliance_alerts: Vec<ComplianceAlertView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tasks: Option<Vec<TaskDetailView>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum ReviewDataSource {
    Tracker,
    Standard,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Review {
            command: ReviewCommand::Report(args),
        } => run_review_report(args),
        Command::Analyze(args) => run_analysis(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

fn build_service() -> Arc<CreditApplicationService<InMemoryRepository, TracingNotifier>> {
    Arc::new(CreditApplicationService::new(
        Arc::new(InMemoryRepository::default()),
        Arc::new(TracingNotifier),
        SignalLexicon::standard(),
    ))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/credit/review/report", post(review_report_endpoint))
        .with_state(state)
        .merge(application_router(build_service()))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit workflow orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_review_report(args: ReviewReportArgs) -> Result<(), AppError> {
    let ReviewReportArgs {
        submission_date,
        target_decision,
        today,
        tracker_csv,
        list_tasks,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let imported = tracker_csv.is_some();

    let instance = match tracker_csv {
        Some(path) => TrackerReviewImporter::from_path(path, submission_date, target_decision)?,
        None => {
            let blueprint = ReviewWorkflowBlueprint::standard();
            ReviewWorkflowInstance::new(&blueprint, submission_date, target_decision)
        }
    };

    let report = instance.report(today);
    render_review_report(
        &instance,
        &report,
        submission_date,
        target_decision,
        today,
        imported,
        list_tasks,
    );

    Ok(())
}

fn run_analysis(args: AnalyzeArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.request)?;
    let request: AnalysisRequest = serde_json::from_str(&raw)
        .map_err(|err| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err)))?;

    let service = build_service();
    let outcome = service
        .analyze(&request)
        .map_err(|err| AppError::Io(std::io::Error::other(err.to_string())))?;

    println!("{}", outcome.narrative);
    println!("Faktor:");
    for factor in &outcome.factors {
        println!("- {factor}");
    }

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn review_report_endpoint(
    Json(payload): Json<ReviewReportRequest>,
) -> Result<Json<ReviewReportResponse>, AppError> {
    let ReviewReportRequest {
        submission_date,
        target_decision,
        today,
        include_tasks,
        tracker_csv,
    } = payload;

    let (instance, data_source) = if let Some(csv) = tracker_csv {
        let reader = Cursor::new(csv.into_bytes());
        let instance =
            TrackerReviewImporter::from_reader(reader, submission_date, target_decision)?;
        (instance, ReviewDataSource::Tracker)
    } else {
        let blueprint = ReviewWorkflowBlueprint::standard();
        let instance = ReviewWorkflowInstance::new(&blueprint, submission_date, target_decision);
        (instance, ReviewDataSource::Standard)
    };

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let report = instance.report(today);
    let summary = report.summary();
    let tasks = if include_tasks {
        Some(instance.task_details())
    } else {
        None
    };

    Ok(Json(ReviewReportResponse {
        submission_date,
        target_decision,
        today,
        data_source,
        stage_progress: summary.stage_progress,
        role_load: summary.role_load,
        overdue_tasks: summary.overdue_tasks,
        compliance_alerts: summary.compliance_alerts,
        tasks,
    }))
}

fn render_review_report(
    instance: &ReviewWorkflowInstance,
    report: &ReviewReport,
    submission_date: NaiveDate,
    target_decision: NaiveDate,
    today: NaiveDate,
    imported: bool,
    list_tasks: bool,
) {
    println!("5C review workflow");
    println!(
        "Review window: {} -> {} (evaluated {})",
        submission_date, target_decision, today
    );

    if imported {
        println!("Data source: committee tracker CSV import");
    } else {
        println!("Data source: standard blueprint (no tracker data provided)");
    }

    let summary = report.summary();

    println!("\nStage progress");
    for progress in &summary.stage_progress {
        println!(
            "- {}: {}/{} tasks completed",
            progress.stage_label, progress.completed, progress.total
        );
    }

    println!("\nRole workload");
    for load in &summary.role_load {
        println!(
            "- {}: {} open, {} overdue",
            load.role_label, load.open, load.overdue
        );
    }

    if summary.overdue_tasks.is_empty() {
        println!("\nOverdue tasks: none");
    } else {
        println!("\nOverdue tasks");
        for task in &summary.overdue_tasks {
            println!(
                "- {} ({}), role {}, due {}, status {}",
                task.name, task.stage_label, task.role_label, task.due_date, task.status_label
            );
        }
    }

    if summary.compliance_alerts.is_empty() {
        println!("\nCompliance alerts: none");
    } else {
        println!("\nCompliance alerts");
        for alert in &summary.compliance_alerts {
            println!(
                "- [{}] {}: {}",
                alert.severity_label, alert.topic, alert.detail
            );
        }
    }

    if list_tasks {
        println!("\nTask breakdown by due date");
        for task in instance.task_details() {
            let completion_note = match task.completed_on {
                Some(date) => format!(" (completed {date})"),
                None => String::new(),
            };
            println!(
                "- {} | {} | {} | due {} | status {}{}",
                task.key,
                task.name,
                task.stage_label,
                task.due_date,
                task.status_label,
                completion_note
            );
        }
    }
}
