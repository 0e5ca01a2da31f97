//! oxide-form CLI
//!
//! Command-line tool for checking form schemas and dry-running submissions.

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use oxide_schema_forms::{
    ActionOutcome, ButtonAction, Callbacks, EditPolicy, FieldSchema, FormSchema, FormValues,
    SchemaForm,
};

/// Schema-driven form checker.
#[derive(Parser)]
#[command(name = "oxide-form")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, env = "OXIDE_FORM_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a schema and list its fields.
    Check {
        /// Path to the JSON schema.
        schema: PathBuf,
    },

    /// Fill a form from a JSON object of values and press a button.
    Submit {
        /// Path to the JSON schema.
        schema: PathBuf,

        /// Path to a JSON object mapping field names to strings or booleans.
        #[arg(short, long)]
        values: PathBuf,

        /// Button to press (first submit button if not specified).
        #[arg(short, long)]
        button: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Check { schema } => {
            let schema = load_schema(&schema)?;
            println!("{} ({} fields)", schema.title, schema.fields.len());
            println!("{:-<60}", "");
            for field in &schema.fields {
                println!(
                    " {:<10} {:<20} {}{}",
                    field.type_tag(),
                    field.name(),
                    field.label(),
                    describe(field)
                );
            }
        }

        Commands::Submit {
            schema,
            values,
            button,
        } => {
            let form = SchemaForm::new(load_schema(&schema)?)?;
            fill(&form, &values)?;

            let button = match button {
                Some(name) => name,
                None => form
                    .schema()
                    .buttons()
                    .find(|b| b.button_action() == ButtonAction::Submit)
                    .map(|b| b.name.clone())
                    .ok_or_else(|| anyhow!("schema has no submit button"))?,
            };

            let mut submitted: Option<FormValues> = None;
            let mut command: Option<String> = None;
            let outcome = {
                let mut handler = Callbacks::new(
                    |values| submitted = Some(values),
                    |c: &str| command = Some(c.to_string()),
                );
                form.press(&button, &mut handler)?
            };

            match outcome {
                ActionOutcome::Submitted => {
                    let values = submitted.unwrap_or_default();
                    println!("{}", serde_json::to_string_pretty(&values)?);
                }
                ActionOutcome::Invalid => {
                    eprint!("{}", form.errors());
                    bail!("form is invalid");
                }
                ActionOutcome::Reset => info!("All fields reset."),
                ActionOutcome::Custom(c) => {
                    info!("Custom action: {}", command.unwrap_or(c));
                }
                ActionOutcome::Ignored => bail!("field {button} is not a button"),
            }
        }
    }

    Ok(())
}

fn load_schema(path: &Path) -> anyhow::Result<FormSchema> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    FormSchema::from_json(&json).with_context(|| format!("invalid schema in {}", path.display()))
}

fn fill(form: &SchemaForm, path: &Path) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let values: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON object", path.display()))?;

    for (name, value) in values {
        match value {
            serde_json::Value::String(text) => {
                if !form.text(&name)?.edit(&text, EditPolicy::Deferred) {
                    warn!("Value {text:?} rejected for field {name}");
                }
            }
            serde_json::Value::Bool(flag) => form.flag(&name)?.set_field(flag),
            other => bail!("unsupported value for field {name}: {other}"),
        }
    }
    Ok(())
}

fn describe(field: &FieldSchema) -> String {
    let mut notes = Vec::new();
    match field {
        FieldSchema::TextArea(f) => notes.push(format!("max {} lines", f.max_lines)),
        FieldSchema::Select(f) => notes.push(format!("options: {}", f.options.join(", "))),
        FieldSchema::Checkbox(f) if f.checked => notes.push("checked".to_string()),
        FieldSchema::Button(f) => notes.push(format!("action: {}", f.action)),
        FieldSchema::Text(_)
        | FieldSchema::Number(_)
        | FieldSchema::Checkbox(_)
        | FieldSchema::Date(_) => {}
    }
    if let Some(rule) = field.validation() {
        if rule.required {
            notes.push("required".to_string());
        }
        if rule.required_checked {
            notes.push("must be checked".to_string());
        }
        if let Some(min) = rule.min_length {
            notes.push(format!("min {min}"));
        }
        if let Some(max) = rule.max_length {
            notes.push(format!("max {max}"));
        }
        if let Some(regex) = &rule.regex {
            notes.push(format!("pattern {regex}"));
        }
    }
    if notes.is_empty() {
        String::new()
    } else {
        format!(" [{}]", notes.join("; "))
    }
}
