use std::io::Write;

use colored::Colorize;
use libdhmm::infer::structs::ProbMatrix;
use libdhmm::structs::Observations;
use log::info;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::Serialize;

use crate::args::{QueryArgs, SampleArgs, ShowArgs};

#[derive(Serialize)]
struct MatrixOutput<'a> {
    states: &'a [String],
    matrix: &'a ProbMatrix,
}

#[derive(Serialize)]
struct BackwardOutput<'a> {
    states: &'a [String],
    beta: &'a ProbMatrix,
    beta_zero: &'a [f64],
    beta_zero_sum: f64,
}

#[derive(Serialize)]
struct ViterbiOutput<'a> {
    path: &'a [String],
    states: &'a [usize],
    probability: f64,
}

#[derive(Serialize)]
struct SampleOutput {
    states: Vec<String>,
    emissions: Vec<String>,
}

fn write_heading(out: &mut impl Write, heading: &str) -> anyhow::Result<()> {
    writeln!(out, "{}", heading.bold())?;
    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn show(args: &ShowArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let model = args.model_args.load()?;

    if args.output_args.json {
        write_json(out, &model.to_config())
    } else {
        write!(out, "{model}")?;
        Ok(())
    }
}

pub fn forward(args: &QueryArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let model = args.model_args.load()?;
    let observations = args.observations()?;

    let alpha = model.forward(&observations)?;
    let probability = model.forward_probability(&observations)?;
    info!("forward probability: {probability:e}");

    if args.output_args.json {
        write_json(
            out,
            &MatrixOutput {
                states: model.state_labels(),
                matrix: &alpha,
            },
        )
    } else {
        write_heading(out, "Forward Matrix (alpha):")?;
        writeln!(out, "{}", model.render_matrix(&alpha))?;
        writeln!(out, "P(observations) = {probability:e}")?;
        Ok(())
    }
}

pub fn backward(args: &QueryArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let model = args.model_args.load()?;
    let observations = args.observations()?;

    let result = model.backward(&observations)?;

    if args.output_args.json {
        write_json(
            out,
            &BackwardOutput {
                states: model.state_labels(),
                beta: &result.beta,
                beta_zero: &result.beta_zero,
                beta_zero_sum: result.beta_zero_sum(),
            },
        )
    } else {
        write_heading(out, "Backward Matrix (beta):")?;
        writeln!(out, "{}", model.render_matrix(&result.beta))?;
        write_heading(out, "Beta-Zero Vector:")?;
        writeln!(out, "{}", model.render_vector(&result.beta_zero))?;
        writeln!(out, "P(observations) = {:e}", result.beta_zero_sum())?;
        Ok(())
    }
}

pub fn posterior(args: &QueryArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let model = args.model_args.load()?;
    let observations = args.observations()?;

    let gamma = model.forward_backward(&observations)?;

    if args.output_args.json {
        write_json(
            out,
            &MatrixOutput {
                states: model.state_labels(),
                matrix: &gamma,
            },
        )
    } else {
        write_heading(out, "Posterior Matrix (gamma):")?;
        writeln!(out, "{}", model.render_matrix(&gamma))?;
        Ok(())
    }
}

pub fn viterbi(args: &QueryArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let model = args.model_args.load()?;
    let observations = args.observations()?;

    let trace = model.viterbi_trace(&observations)?;
    let path = trace.labels(model.state_labels());

    if args.output_args.json {
        write_json(
            out,
            &ViterbiOutput {
                path: &path,
                states: &trace.states,
                probability: trace.probability,
            },
        )
    } else {
        write_heading(out, "Viterbi Path:")?;
        writeln!(out, "{}", model.render_path(&path))?;
        writeln!(out, "P(path, observations) = {:e}", trace.probability)?;
        Ok(())
    }
}

pub fn sample(args: &SampleArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let model = args.model_args.load()?;
    let mut rng = Pcg64::seed_from_u64(args.seed);

    let sample = model.sample(args.length, &mut rng)?;
    let output = SampleOutput {
        states: sample.state_labels(&model),
        emissions: match sample.observations(&model) {
            Observations::Labels(labels) => labels,
            Observations::Indices(indices) => indices.iter().map(|i| i.to_string()).collect(),
        },
    };

    if args.output_args.json {
        write_json(out, &output)
    } else {
        write_heading(out, "Hidden States:")?;
        writeln!(out, "{}", output.states.join(" "))?;
        write_heading(out, "Emissions:")?;
        writeln!(out, "{}", output.emissions.join(" "))?;
        Ok(())
    }
}
