use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vitals_api::{decode_patients, ApiConfig, PatientClient};
use vitals_core::{
    default_months_window, derive_report, BpStatus, ContactInfo, DashboardConfig, DashboardState,
    VitalsReport,
};

#[derive(Parser, Debug)]
#[command(
    name = "vitals-cli",
    about = "Fetch the patient list and print the derived vitals dashboard."
)]
struct Args {
    /// Read patients from a local JSON file instead of the HTTP endpoint.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Patient to select, overriding the default-selection rule.
    #[arg(short, long)]
    patient: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut state = DashboardState::new(DashboardConfig::default());
    match &args.input {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read patient file {path:?}"))?;
            let patients = decode_patients(&data).context("cannot decode patient file")?;
            state.apply_fetched(patients);
        }
        None => {
            let client = PatientClient::new(ApiConfig::from_env());
            client.load_into(&mut state);
        }
    }

    if let Some(name) = &args.patient {
        state.select_patient(name);
    }

    let window = default_months_window();
    let report = derive_report(state.selected_patient(), &window);

    match state.selected_patient() {
        Some(patient) => {
            println!("Patient: {}\n", patient.name);
            print_report(&report);
            print_contact(&ContactInfo::for_patient(patient));
        }
        None => println!("No patient selected (empty or failed fetch)."),
    }

    Ok(())
}

fn print_report(report: &VitalsReport) {
    println!("Blood pressure (systolic/diastolic):");
    for point in &report.series {
        match (point.systolic, point.diastolic) {
            (Some(sys), Some(dia)) => println!(
                "  {:<8} {}/{}",
                point.label,
                vitals_core::format_numeric(sys),
                vitals_core::format_numeric(dia)
            ),
            _ => println!("  {:<8} --", point.label),
        }
    }

    match report.averages {
        Some(averages) => println!(
            "\nAverages: systolic {} ({}), diastolic {} ({})",
            averages.systolic,
            status_text(report.classification.systolic),
            averages.diastolic,
            status_text(report.classification.diastolic),
        ),
        None => println!("\nAverages: N/A"),
    }

    if !report.stat_cards.is_empty() {
        println!("\nLatest readings:");
        for card in &report.stat_cards {
            println!("  {:<18} {:<10} {}", card.label, card.value, card.sign);
        }
    }
}

fn print_contact(info: &ContactInfo) {
    println!("\nContact:");
    println!("  Date of Birth      {}", info.date_of_birth);
    println!("  Gender             {}", info.gender);
    println!("  Phone Number       {}", info.phone_number);
    println!("  Emergency Contact  {}", info.emergency_contact);
    println!("  Insurance Type     {}", info.insurance_type);
}

fn status_text(status: Option<BpStatus>) -> &'static str {
    match status {
        Some(BpStatus::Higher) => "higher than average",
        Some(BpStatus::Lower) => "lower than average",
        Some(BpStatus::Average) => "average",
        None => "no data",
    }
}
