use clap::{Parser, ValueEnum};
use sdof_srs::{
    AccelerationTimeHistory, FieldCalculator, HalfStepVerlet, Solver, SrsBuilder, SrsError,
    SrsResult, SymplecticEuler, ToPickle, TrapezoidalVerlet,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scheme {
    /// Velocity-Verlet with exact velocity coupling
    Trapezoidal,
    /// Velocity-Verlet with half-step velocity predictor
    HalfStep,
    /// Semi-implicit Euler
    SymplecticEuler,
    /// Update rule of the SRS web calculator
    FieldCalculator,
}

/// Shock Response Spectrum of a base acceleration time history
///
/// The input file is either a single column of acceleration samples
/// or 2 columns with the sample times and the acceleration samples
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Acceleration time history file
    input: PathBuf,
    /// Sample interval in second, required for single column input
    #[arg(short = 't', long)]
    sampling_interval: Option<f64>,
    /// Oscillators quality factor
    #[arg(short, long, default_value_t = 10.)]
    quality_factor: f64,
    /// Comma separated natural frequencies in Hz
    #[arg(short, long, value_delimiter = ',')]
    frequencies: Vec<f64>,
    /// Lowest natural frequency in Hz of the logarithmic sweep
    #[arg(long, default_value_t = 10.)]
    start: f64,
    /// Highest natural frequency in Hz of the logarithmic sweep
    #[arg(long, default_value_t = 2000.)]
    end: f64,
    /// Number of natural frequencies of the logarithmic sweep
    #[arg(short, long, default_value_t = 50)]
    n_frequency: usize,
    /// Time integration scheme under verification
    #[arg(long, value_enum, default_value_t = Scheme::Trapezoidal)]
    scheme: Scheme,
    /// Saves the spectrum to a pickle file
    #[arg(long)]
    pickle: Option<PathBuf>,
}

fn read_history<P: AsRef<Path>>(
    path: P,
    sampling_interval: Option<f64>,
) -> Result<AccelerationTimeHistory, Box<dyn std::error::Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;
    let rows = rdr
        .records()
        .map(|record| {
            record?
                .iter()
                .map(|x| x.parse::<f64>().map_err(|e| e.into()))
                .collect::<Result<Vec<f64>, Box<dyn std::error::Error>>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let history = match (rows.first().map(|row| row.len()), sampling_interval) {
        (Some(1), Some(tau)) => {
            AccelerationTimeHistory::new(rows.into_iter().map(|row| row[0]).collect(), tau)?
        }
        (Some(1), None) => {
            return Err(SrsError::MalformedInput(
                "the sample interval is required for single column input".to_owned(),
            )
            .into())
        }
        (Some(2), _) => {
            if rows.iter().any(|row| row.len() != 2) {
                return Err(SrsError::MalformedInput("inconsistent number of columns".to_owned()).into());
            }
            let (time, samples): (Vec<f64>, Vec<f64>) =
                rows.into_iter().map(|row| (row[0], row[1])).unzip();
            AccelerationTimeHistory::from_time_samples(&time, samples)?
        }
        (n, _) => {
            return Err(SrsError::MalformedInput(format!(
                "expected 1 or 2 columns, found {:?}",
                n.unwrap_or_default()
            ))
            .into())
        }
    };
    Ok(history)
}

fn compute<T: Solver + Send + Sync>(
    cli: &Cli,
    history: &AccelerationTimeHistory,
) -> sdof_srs::Result<SrsResult> {
    let builder = SrsBuilder::<T>::new().quality_factor(cli.quality_factor);
    let builder = if cli.frequencies.is_empty() {
        builder.log_frequencies(cli.start, cli.end, cli.n_frequency)
    } else {
        builder.frequencies(cli.frequencies.clone())
    };
    Ok(builder.build()?.compute(history))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let history = read_history(&cli.input, cli.sampling_interval)?;
    log::info!("{}", history);

    let result = match cli.scheme {
        Scheme::Trapezoidal => compute::<TrapezoidalVerlet>(&cli, &history)?,
        Scheme::HalfStep => compute::<HalfStepVerlet>(&cli, &history)?,
        Scheme::SymplecticEuler => compute::<SymplecticEuler>(&cli, &history)?,
        Scheme::FieldCalculator => compute::<FieldCalculator>(&cli, &history)?,
    };

    println!("# frequency [Hz], reference SRS, {:?} SRS", cli.scheme);
    print!("{}", result);
    println!(
        "# Q={}, max. relative error: {:.3e}",
        result.quality_factor,
        result.max_relative_error()
    );

    if let Some(path) = &cli.pickle {
        result.to_pickle(path)?;
    }

    Ok(())
}
