//! `Tranxbit` CLI: command-line client for the `Tranxbit` server.
//!
//! A standalone HTTP client. No internal crate dependencies; it talks to the
//! server exclusively via the REST API.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

const BANNER_SMALL: &str = "◆ Tranxbit";

// ── CLI structure ────────────────────────────────────────────────────

/// Tranxbit: buy and sell gift cards.
#[derive(Parser)]
#[command(
    name = "tranxbit",
    version,
    about = "Tranxbit CLI: check sign-ups, register accounts, browse gift cards",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         TRANXBIT_ADDR       Server address (default: http://127.0.0.1:8300)\n  \
         TRANXBIT_PASSWORD   Password for check/register\n\n\
         {DIM}Examples:{RESET}\n  \
         tranxbit status\n  \
         tranxbit check --first-name Jo --last-name Do --email jo@do.com\n  \
         tranxbit brands --query steam\n  \
         tranxbit quote --brand amazon --amount 50 --quantity 3"
    ),
)]
struct Cli {
    /// Tranxbit server address.
    #[arg(long, env = "TRANXBIT_ADDR", default_value = "http://127.0.0.1:8300")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show server health.
    Status,
    /// Validate a sign-up without submitting it.
    Check(DraftArgs),
    /// Create an account.
    Register(DraftArgs),
    /// List gift-card brands.
    Brands {
        /// Case-insensitive filter on brand name.
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Price a gift-card purchase.
    Quote {
        /// Brand slug (e.g. `amazon`).
        #[arg(long)]
        brand: String,
        /// Card value in dollars.
        #[arg(long)]
        amount: u32,
        /// Number of cards.
        #[arg(long, default_value = "1")]
        quantity: u32,
    },
    /// Show frequently asked questions.
    Faq,
    /// Show the account dashboard header.
    Dashboard,
}

#[derive(Args)]
struct DraftArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    /// Account password.
    #[arg(long, env = "TRANXBIT_PASSWORD", hide_env_values = true)]
    password: String,
    /// Confirmation; defaults to the password.
    #[arg(long)]
    confirm_password: Option<String>,
}

impl DraftArgs {
    fn to_json(&self) -> Value {
        json!({
            "firstName": self.first_name,
            "lastName": self.last_name,
            "email": self.email,
            "password": self.password,
            "confirmPassword": self.confirm_password.as_deref().unwrap_or(&self.password),
        })
    }
}

// ── Pretty output helpers ────────────────────────────────────────────

fn header(icon: &str, title: &str) {
    println!("{BOLD}{CYAN}{icon} {title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn kv_line(key: &str, value: &str) {
    println!("  {DIM}{key:<20}{RESET} {WHITE}{value}{RESET}");
}

fn success(msg: &str) {
    println!("{GREEN}{BOLD}✓{RESET} {msg}");
}

fn warning(msg: &str) {
    println!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

fn mark(ok: bool) -> String {
    if ok {
        format!("{GREEN}✓{RESET}")
    } else {
        format!("{RED}✗{RESET}")
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

fn strength_bar(score: u64, band: &str) -> String {
    let width = 20;
    let filled = usize::try_from(score.min(100) * width / 100).unwrap_or(0);
    let empty = usize::try_from(width).unwrap_or(0).saturating_sub(filled);
    let color = match band {
        "strong" => GREEN,
        "medium" => YELLOW,
        _ => RED,
    };
    format!(
        "{color}[{}{DIM}{}]{RESET}",
        "█".repeat(filled),
        "░".repeat(empty)
    )
}

fn print_validation(resp: &Value) {
    let report = &resp["report"];
    let view = &resp["view"];

    header("📝", "Sign-up Check");
    for (label, key) in [
        ("First name", "first_name_valid"),
        ("Last name", "last_name_valid"),
        ("Email", "email_valid"),
    ] {
        let ok = report.get(key).and_then(Value::as_bool).unwrap_or(false);
        kv_line(label, &mark(ok));
    }
    let matched = report["password"]["passwords_match"].as_bool().unwrap_or(false);
    kv_line("Passwords match", &mark(matched));

    let score = resp.get("strength").and_then(Value::as_u64).unwrap_or(0);
    let band = str_field(resp, "band");
    kv_line(
        "Strength",
        &format!("{} {score}% {band}", strength_bar(score, band)),
    );
    println!();

    if let Some(items) = view["password_help"]["checklist"].as_array() {
        for item in items {
            let met = item.get("met").and_then(Value::as_bool).unwrap_or(false);
            println!("  {} {}", mark(met), str_field(item, "text"));
        }
        println!();
    }

    if let Some(notice) = view.get("forbidden_password").and_then(Value::as_str) {
        warning(notice);
    }
}

// ── HTTP client ──────────────────────────────────────────────────────

struct Client {
    http: reqwest::Client,
    addr: String,
}

impl Client {
    fn new(addr: String) -> Self {
        let http = reqwest::Client::new();
        Self {
            http,
            addr: addr.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.addr)
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let resp = self
            .http
            .get(self.url(path))
            .send()
            .await
            .context("request failed")?;
        handle_response(resp).await
    }

    async fn get_query(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let resp = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .context("request failed")?;
        handle_response(resp).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let resp = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .context("request failed")?;
        handle_response(resp).await
    }
}

/// Decode a JSON body, turning the server's `{error, message, detail}`
/// error shape into an `anyhow` error.
async fn handle_response(resp: reqwest::Response) -> Result<Value> {
    let status = resp.status();
    if status == reqwest::StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    let body = resp.text().await.context("failed to read response body")?;
    if !status.is_success() {
        let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        match (
            parsed.get("message").and_then(Value::as_str),
            parsed.get("detail").and_then(Value::as_str),
        ) {
            (_, Some(detail)) => bail!("{detail}"),
            (Some(message), None) => bail!("{message}"),
            (None, None) => bail!("server returned {status}: {body}"),
        }
    }
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).context("failed to parse response JSON")
}

// ── Command dispatch ─────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let client = Client::new(cli.addr);

    match run(client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(client: Client, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Status => cmd_status(&client).await,
        Commands::Check(draft) => cmd_check(&client, &draft).await,
        Commands::Register(draft) => cmd_register(&client, &draft).await,
        Commands::Brands { query } => cmd_brands(&client, query.as_deref()).await,
        Commands::Quote {
            brand,
            amount,
            quantity,
        } => cmd_quote(&client, &brand, amount, quantity).await,
        Commands::Faq => cmd_faq(&client).await,
        Commands::Dashboard => cmd_dashboard(&client).await,
    }
}

// ── System commands ──────────────────────────────────────────────────

async fn cmd_status(client: &Client) -> Result<()> {
    println!();
    println!("  {BANNER_SMALL} {DIM}checking health...{RESET}");
    println!();
    let resp = client.get("/v1/sys/health").await?;
    header("💳", "Server Status");
    kv_line("Status", &format!("{GREEN}{}{RESET}", str_field(&resp, "status")));
    kv_line("Version", str_field(&resp, "version"));
    kv_line("Address", &client.addr);
    println!();
    Ok(())
}

// ── Registration commands ────────────────────────────────────────────

async fn cmd_check(client: &Client, draft: &DraftArgs) -> Result<()> {
    let resp = client.post("/v1/register/validate", &draft.to_json()).await?;
    print_validation(&resp);

    let decision = &resp["decision"];
    if str_field(decision, "decision") == "accept" {
        success("Ready to register");
        Ok(())
    } else {
        bail!("sign-up would be rejected: {}", str_field(decision, "reason"))
    }
}

async fn cmd_register(client: &Client, draft: &DraftArgs) -> Result<()> {
    let resp = client.post("/v1/register", &draft.to_json()).await?;
    success("Account created");
    kv_line("Next step", str_field(&resp, "next"));
    println!(
        "  {DIM}Check your inbox at{RESET} {BOLD}{}{RESET} {DIM}to verify your email.{RESET}",
        str_field(&resp, "email")
    );
    println!();
    Ok(())
}

// ── Catalog commands ─────────────────────────────────────────────────

async fn cmd_brands(client: &Client, query: Option<&str>) -> Result<()> {
    let resp = client
        .get_query("/v1/catalog/brands", &[("q", query.unwrap_or(""))])
        .await?;
    let brands = resp["brands"].as_array().cloned().unwrap_or_default();

    header("🎁", "Gift Card Brands");
    if brands.is_empty() {
        warning("No brands match your search");
        return Ok(());
    }
    for brand in &brands {
        kv_line(str_field(brand, "slug"), str_field(brand, "label"));
    }
    println!();
    Ok(())
}

async fn cmd_quote(client: &Client, brand: &str, amount: u32, quantity: u32) -> Result<()> {
    let body = json!({ "brand": brand, "amount": amount, "quantity": quantity });
    let resp = client.post("/v1/catalog/quote", &body).await?;

    header("🧾", "Quote");
    kv_line("Brand", str_field(&resp["brand"], "label"));
    kv_line("Card value", &format!("${amount}"));
    kv_line(
        "Quantity",
        &resp["quantity"].as_u64().unwrap_or(u64::from(quantity)).to_string(),
    );
    kv_line(
        "Total",
        &format!("{BOLD}{}{RESET}", str_field(&resp, "formatted_total")),
    );
    println!();
    Ok(())
}

// ── Content commands ─────────────────────────────────────────────────

async fn cmd_faq(client: &Client) -> Result<()> {
    let resp = client.get("/v1/content/faq").await?;
    header("❓", "Frequently Asked Questions");
    for entry in resp["entries"].as_array().into_iter().flatten() {
        println!("  {BOLD}{}{RESET}", str_field(entry, "question"));
        println!("  {DIM}{}{RESET}", str_field(entry, "answer"));
        println!();
    }
    Ok(())
}

async fn cmd_dashboard(client: &Client) -> Result<()> {
    let resp = client.get("/v1/dashboard/summary").await?;
    header("📊", "Dashboard");
    kv_line(
        "Account",
        &format!(
            "{} ({})",
            str_field(&resp, "display_name"),
            str_field(&resp, "initials")
        ),
    );
    kv_line("Available credits", str_field(&resp, "formatted_credits"));
    kv_line(
        "Pending orders",
        &resp["pending_orders"].as_u64().unwrap_or(0).to_string(),
    );
    kv_line(
        "Unread",
        &resp["unread_notifications"].as_u64().unwrap_or(0).to_string(),
    );
    println!();
    Ok(())
}
