//! Command-line interface for the attendance predictor.
//!
//! Two operations mirror the two prediction paths: `batch` runs a whole
//! day's CSV through validation, prediction, summary, and the capacity
//! check; `patient` encodes one form and predicts attendance, optionally
//! reusing a batch-path capacity state for the booking verdict.

use anyhow::{Context, bail};
use log::{info, warn};
use noshow::{
    BatchPredictor, CapacityState, CapacityVerdict, Gender, PatientForm, SinglePredictor,
    Weekday, load_classifier, read_appointments_csv,
};
use std::path::Path;

/// Capacity used by `batch` when the operator does not pass one
const DEFAULT_CAPACITY: u32 = 20;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("batch") => run_batch(&args[1..]),
        Some("patient") => run_patient(&args[1..]),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  noshow batch <model.json> <appointments.csv> [max_capacity]");
    println!("  noshow patient <model.json> --age N --gender M|F --weekday Lundi..Dimanche");
    println!("                 [--scholarship oui|non] [--hypertension oui|non]");
    println!("                 [--diabetes oui|non] [--alcoholism oui|non]");
    println!("                 [--handicap 0..4] [--sms oui|non] [--waiting-days 0..365]");
    println!("                 [--capacity 1..100 --present N]");
}

/// Batch path: upload -> validation -> prediction -> summary -> capacity
fn run_batch(args: &[String]) -> anyhow::Result<()> {
    let [model_path, csv_path, rest @ ..] = args else {
        print_usage();
        bail!("batch requires <model.json> and <appointments.csv>");
    };
    let max_capacity: u32 = match rest.first() {
        Some(value) => value
            .parse()
            .with_context(|| format!("max capacity '{value}' is not an integer"))?,
        None => DEFAULT_CAPACITY,
    };

    let classifier = load_classifier(Path::new(model_path))?;
    let batch = read_appointments_csv(Path::new(csv_path))?;
    info!(
        "Loaded {} appointments with {} columns from {csv_path}",
        batch.num_rows(),
        batch.num_columns()
    );

    // Preview of the uploaded data
    let head = batch.slice(0, batch.num_rows().min(5));
    println!("{}", arrow::util::pretty::pretty_format_batches(&[head])?);

    let predictor = BatchPredictor::new(classifier)?;
    let result = predictor.predict(&batch)?;

    println!(
        "{}",
        arrow::util::pretty::pretty_format_batches(&[result.table.clone()])?
    );
    println!("Rendez-vous total : {}", result.summary.total);
    println!(
        "Personnes attendues (prédites) : {}",
        result.summary.predicted_present
    );
    println!(
        "Personnes absentes (prédites) : {}",
        result.summary.predicted_absent
    );

    match result.capacity(max_capacity)?.verdict() {
        CapacityVerdict::Available(n) => info!("{n} place(s) left today"),
        CapacityVerdict::Full => warn!("The schedule is full today"),
    }
    Ok(())
}

/// Single-patient path: form -> encoding -> prediction -> booking verdict
fn run_patient(args: &[String]) -> anyhow::Result<()> {
    let [model_path, rest @ ..] = args else {
        print_usage();
        bail!("patient requires <model.json> followed by form fields");
    };

    let mut age: Option<u32> = None;
    let mut gender: Option<Gender> = None;
    let mut weekday: Option<Weekday> = None;
    let mut scholarship = false;
    let mut hypertension = false;
    let mut diabetes = false;
    let mut alcoholism = false;
    let mut handicap: u32 = 0;
    let mut sms_received = false;
    let mut waiting_days: u32 = 0;
    let mut capacity: Option<u32> = None;
    let mut present: Option<u64> = None;

    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--age" => age = Some(next_value(&mut iter, "--age")?.parse()?),
            "--gender" => gender = Some(next_value(&mut iter, "--gender")?.parse()?),
            "--weekday" => weekday = Some(next_value(&mut iter, "--weekday")?.parse()?),
            "--scholarship" => scholarship = parse_yes_no(next_value(&mut iter, "--scholarship")?)?,
            "--hypertension" => {
                hypertension = parse_yes_no(next_value(&mut iter, "--hypertension")?)?;
            }
            "--diabetes" => diabetes = parse_yes_no(next_value(&mut iter, "--diabetes")?)?,
            "--alcoholism" => alcoholism = parse_yes_no(next_value(&mut iter, "--alcoholism")?)?,
            "--handicap" => handicap = next_value(&mut iter, "--handicap")?.parse()?,
            "--sms" => sms_received = parse_yes_no(next_value(&mut iter, "--sms")?)?,
            "--waiting-days" => waiting_days = next_value(&mut iter, "--waiting-days")?.parse()?,
            "--capacity" => capacity = Some(next_value(&mut iter, "--capacity")?.parse()?),
            "--present" => present = Some(next_value(&mut iter, "--present")?.parse()?),
            other => {
                print_usage();
                bail!("unknown argument '{other}'");
            }
        }
    }

    let form = PatientForm {
        age: age.context("--age is required")?,
        gender: gender.context("--gender is required")?,
        scholarship,
        hypertension,
        diabetes,
        alcoholism,
        handicap,
        sms_received,
        waiting_days,
        weekday: weekday.context("--weekday is required")?,
    };

    // A booking verdict needs the batch-path capacity state; with no batch
    // run, no capacity is assumed.
    let capacity_state = match (capacity, present) {
        (Some(max), Some(present)) => Some(CapacityState::new(max, present)?),
        (None, None) => None,
        _ => bail!("--capacity and --present must be given together"),
    };

    let classifier = load_classifier(Path::new(model_path))?;
    let predictor = SinglePredictor::new(classifier)?;
    let prediction = predictor.predict_with_capacity(&form, capacity_state.as_ref())?;

    let percent = prediction.result.probability_present * 100.0;
    if prediction.result.will_show() {
        info!("The model predicts this patient will attend ({percent:.1}% probability)");
    } else {
        warn!("The model predicts this patient will not attend ({percent:.1}% probability)");
    }

    match prediction.booking {
        Some(CapacityVerdict::Available(n)) => {
            info!("A booking can be made: {n} place(s) left today");
        }
        Some(CapacityVerdict::Full) => warn!("No booking possible: the schedule is full"),
        None => {}
    }
    Ok(())
}

fn next_value<'a>(
    iter: &mut std::slice::Iter<'a, String>,
    flag: &str,
) -> anyhow::Result<&'a String> {
    iter.next().with_context(|| format!("missing value for {flag}"))
}

/// Yes/no form answers, accepted in the forms the operators actually type
fn parse_yes_no(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "oui" | "yes" | "1" | "true" => Ok(true),
        "non" | "no" | "0" | "false" => Ok(false),
        other => bail!("expected oui or non, got '{other}'"),
    }
}
