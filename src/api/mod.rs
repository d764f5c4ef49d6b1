use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::core::{ProjectionResult, SimulationInputs, YearSnapshot, project};

pub mod render;

use render::{outcome_message, render_report};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

const MAX_SAVINGS_RATE_PCT: f64 = 90.0;
const MAX_INVESTMENT_RETURN_PCT: f64 = 15.0;
const MAX_INFLATION_RATE_PCT: f64 = 8.0;
const MAX_EXPENSE_GROWTH_PCT: f64 = 10.0;
const MIN_YEARS: u32 = 10;
const MAX_YEARS: u32 = 60;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    current_net_worth: Option<f64>,
    annual_income: Option<f64>,
    savings_rate: Option<f64>,
    current_annual_expenses: Option<f64>,
    investment_return: Option<f64>,
    inflation_rate: Option<f64>,
    expense_growth: Option<f64>,
    years: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fi-simulator",
    about = "Projects net worth against a rising financial independence target (25x expenses)",
    after_help = "Run `fi-simulator serve [port]` to start the HTTP API and web page."
)]
pub struct Cli {
    #[arg(long, default_value_t = 100_000.0)]
    current_net_worth: f64,
    #[arg(long, default_value_t = 120_000.0)]
    annual_income: f64,
    #[arg(
        long,
        default_value_t = 25.0,
        help = "Share of income saved each year in percent (0-90)"
    )]
    savings_rate: f64,
    #[arg(long, default_value_t = 60_000.0)]
    current_annual_expenses: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Expected annual investment return in percent (0-15)"
    )]
    investment_return: f64,
    #[arg(
        long,
        default_value_t = 2.5,
        help = "Annual inflation rate in percent (0-8)"
    )]
    inflation_rate: f64,
    #[arg(
        long,
        default_value_t = 1.0,
        help = "Lifestyle expense growth on top of inflation in percent (0-10)"
    )]
    expense_growth: f64,
    #[arg(long, default_value_t = 30, help = "Years to simulate (10-60)")]
    years: u32,
    #[arg(long, help = "Print the year-by-year table")]
    table: bool,
    #[arg(long, help = "Print the JSON response instead of text")]
    json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse<'a> {
    inputs: &'a SimulationInputs,
    annual_savings: f64,
    fi_year: Option<u32>,
    reached: bool,
    message: String,
    snapshots: &'a [YearSnapshot],
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_inputs(cli: &Cli) -> Result<SimulationInputs, String> {
    for (name, amount) in [
        ("--current-net-worth", cli.current_net_worth),
        ("--annual-income", cli.annual_income),
        ("--current-annual-expenses", cli.current_annual_expenses),
    ] {
        if !amount.is_finite() || amount < 0.0 {
            return Err(format!("{name} must be >= 0"));
        }
    }

    for (name, rate, max) in [
        ("--savings-rate", cli.savings_rate, MAX_SAVINGS_RATE_PCT),
        (
            "--investment-return",
            cli.investment_return,
            MAX_INVESTMENT_RETURN_PCT,
        ),
        ("--inflation-rate", cli.inflation_rate, MAX_INFLATION_RATE_PCT),
        ("--expense-growth", cli.expense_growth, MAX_EXPENSE_GROWTH_PCT),
    ] {
        if !(0.0..=max).contains(&rate) {
            return Err(format!("{name} must be between 0 and {max}"));
        }
    }

    if !(MIN_YEARS..=MAX_YEARS).contains(&cli.years) {
        return Err(format!("--years must be between {MIN_YEARS} and {MAX_YEARS}"));
    }

    Ok(SimulationInputs {
        current_net_worth: cli.current_net_worth,
        annual_income: cli.annual_income,
        savings_rate: cli.savings_rate / 100.0,
        current_annual_expenses: cli.current_annual_expenses,
        investment_return: cli.investment_return / 100.0,
        inflation_rate: cli.inflation_rate / 100.0,
        expense_growth: cli.expense_growth / 100.0,
        years: cli.years,
    })
}

/// Runs one projection from command-line flags and returns the text to print.
pub fn run_cli(cli: &Cli) -> Result<String, String> {
    let inputs = build_inputs(cli)?;
    let result = project(&inputs).map_err(|e| e.to_string())?;

    if cli.json {
        let response = build_project_response(&inputs, &result);
        let json = serde_json::to_string_pretty(&response)
            .map_err(|e| format!("Failed to serialize response: {e}"))?;
        return Ok(format!("{json}\n"));
    }

    Ok(render_report(&inputs, &result, cli.table))
}

fn app() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "FI simulator HTTP API listening");
    info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app()).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(payload: Result<Query<ProjectPayload>, QueryRejection>) -> Response {
    match payload {
        Ok(Query(payload)) => project_handler_impl(payload),
        Err(e) => rejected_payload_response(&format!("Invalid API query parameters: {e}")),
    }
}

async fn project_post_handler(payload: Result<Json<ProjectPayload>, JsonRejection>) -> Response {
    match payload {
        Ok(Json(payload)) => project_handler_impl(payload),
        Err(e) => rejected_payload_response(&format!("Invalid API JSON payload: {e}")),
    }
}

fn rejected_payload_response(msg: &str) -> Response {
    warn!(error = %msg, "rejected projection request");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn project_handler_impl(payload: ProjectPayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => return rejected_payload_response(&msg),
    };

    match project(&inputs) {
        Ok(result) => json_response(StatusCode::OK, build_project_response(&inputs, &result)),
        Err(err) => {
            warn!(error = %err, "projection failed");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn inputs_from_payload(payload: ProjectPayload) -> Result<SimulationInputs, String> {
    let mut cli = default_cli_for_api();

    if let Some(v) = payload.current_net_worth {
        cli.current_net_worth = v;
    }
    if let Some(v) = payload.annual_income {
        cli.annual_income = v;
    }
    if let Some(v) = payload.savings_rate {
        cli.savings_rate = v;
    }
    if let Some(v) = payload.current_annual_expenses {
        cli.current_annual_expenses = v;
    }
    if let Some(v) = payload.investment_return {
        cli.investment_return = v;
    }
    if let Some(v) = payload.inflation_rate {
        cli.inflation_rate = v;
    }
    if let Some(v) = payload.expense_growth {
        cli.expense_growth = v;
    }
    if let Some(v) = payload.years {
        cli.years = v;
    }

    build_inputs(&cli)
}

fn default_cli_for_api() -> Cli {
    Cli {
        current_net_worth: 100_000.0,
        annual_income: 120_000.0,
        savings_rate: 25.0,
        current_annual_expenses: 60_000.0,
        investment_return: 7.0,
        inflation_rate: 2.5,
        expense_growth: 1.0,
        years: 30,
        table: false,
        json: false,
    }
}

fn build_project_response<'a>(
    inputs: &'a SimulationInputs,
    result: &'a ProjectionResult,
) -> ProjectResponse<'a> {
    ProjectResponse {
        inputs,
        annual_savings: inputs.annual_savings(),
        fi_year: result.fi_year,
        reached: result.reached(),
        message: outcome_message(result),
        snapshots: &result.snapshots,
    }
}
