use anyhow::Context;
use clap::Parser;
use consultation_relay::domain::options::{CareType, Relationship, Urgency};
use consultation_relay::utils::logger;
use consultation_relay::{ConsultationClient, ConsultationForm, ConsultationRequest, FormStatus};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "submit-consultation")]
#[command(about = "Submit a consultation request from a TOML file, the way the site's form does")]
struct Args {
    /// Consultation endpoint to post to
    #[arg(short, long, default_value = "http://127.0.0.1:3000/api/consultation")]
    endpoint: String,

    /// TOML file with camelCase form fields (firstName, lastName, email, ...)
    #[arg(short, long)]
    file: PathBuf,

    /// Behave like the contact page form (urgency preset, cleared on success)
    #[arg(long)]
    contact: bool,

    #[arg(long, default_value = concat!("submit-consultation/", env!("CARGO_PKG_VERSION")))]
    user_agent: String,

    /// Only run the client-side checks
    #[arg(long)]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let request: ConsultationRequest = toml::from_str(&content)
        .with_context(|| format!("parsing {}", args.file.display()))?;

    let mut form = if args.contact {
        ConsultationForm::contact()
    } else {
        ConsultationForm::consultation()
    };
    merge_into(form.fields_mut(), request);
    warn_on_unlisted_options(form.fields());

    if args.dry_run {
        match form.check_shape() {
            Ok(()) => println!("✅ Form passes client-side checks"),
            Err(problem) => {
                eprintln!("❌ {}", problem);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let client = ConsultationClient::new(&args.endpoint, &args.user_agent)?;
    tracing::info!("📨 Submitting to {}", client.endpoint());

    match form.submit(&client).await {
        FormStatus::Success(message) => println!("✅ {}", message),
        FormStatus::Error(message) => {
            eprintln!("❌ {}", message);
            std::process::exit(1);
        }
        other => anyhow::bail!("submission ended in unexpected state {:?}", other),
    }

    Ok(())
}

/// Copy the file's fields over the form, keeping the form's presets for
/// anything the file leaves blank.
fn merge_into(fields: &mut ConsultationRequest, request: ConsultationRequest) {
    let preset_urgency = std::mem::take(&mut fields.urgency);
    *fields = request;
    if fields.urgency.is_empty() {
        fields.urgency = preset_urgency;
    }
}

/// The server accepts free text, but the site only offers its listed options.
fn warn_on_unlisted_options(fields: &ConsultationRequest) {
    if !fields.care_type.is_empty() && CareType::from_label(&fields.care_type).is_none() {
        tracing::warn!("⚠️ careType '{}' is not an option on the site", fields.care_type);
    }
    if !fields.relationship.is_empty() && Relationship::from_label(&fields.relationship).is_none() {
        tracing::warn!("⚠️ relationship '{}' is not an option on the site", fields.relationship);
    }
    if !fields.urgency.is_empty() && Urgency::from_label(&fields.urgency).is_none() {
        tracing::warn!("⚠️ urgency '{}' is not an option on the site", fields.urgency);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_preset_urgency_when_file_leaves_it_blank() {
        let mut form = ConsultationForm::contact();
        let request: ConsultationRequest =
            toml::from_str("firstName = \"Margaret\"\nconsent = true\n").unwrap();

        merge_into(form.fields_mut(), request);
        assert_eq!(form.fields().first_name, "Margaret");
        assert_eq!(form.fields().urgency, Urgency::JustExploring.label());
    }
}
