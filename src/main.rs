use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    // configuration file to read
    configuration_filename: std::path::PathBuf,

    // pace the replay at the configured interval instead of running flat out
    #[arg(long, default_value_t = false)]
    throttle: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let arguments = Cli::parse();

    let configuration_file = std::fs::File::open(arguments.configuration_filename)?;
    let configuration: landfall::configuration::RunConfiguration =
        serde_yaml::from_reader(configuration_file).expect("error reading configuration");

    run(&configuration, arguments.throttle, *landfall::LOG_LEVEL)
}

fn run(
    configuration: &landfall::configuration::RunConfiguration,
    throttle: bool,
    log_level: log::Level,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut predictor = configuration.predictor();

    let replay = match &configuration.telemetry.replay {
        Some(paths) => paths,
        None => {
            return Err("no replay sources configured".into());
        }
    };

    let mut fixes: Vec<landfall::telemetry::GpsFix> = vec![];
    for path in replay {
        report(
            &format!("reading telemetry sentences from {:}", path),
            log::Level::Info,
            log_level,
        );
        let fix_log = landfall::telemetry::file::FixLog::new(path.to_owned())?;
        fixes.extend(fix_log.read_fixes()?);
    }
    fixes.sort_by_key(|fix| fix.time);
    report(
        &format!("{:} - replaying {:} fixes", configuration.name, fixes.len()),
        log::Level::Info,
        log_level,
    );

    let mut last_prediction: Option<landfall::predictor::LandingPrediction> = None;
    for fix in &fixes {
        if let Some(start) = configuration.time.start {
            if fix.time < start {
                continue;
            }
        }
        if let Some(end) = configuration.time.end {
            if fix.time > end {
                continue;
            }
        }

        match predictor.add_fix(fix) {
            Ok(Some(tick)) => {
                if let Some(transition) = tick.transition {
                    report(
                        &format!("*** {:} ***", transition),
                        log::Level::Info,
                        log_level,
                    );
                }
                if let Some(prediction) = tick.prediction {
                    report(
                        &format!(
                            "predicted landing location: ({:.5}, {:.5}) in {:} (CDA {:.2}, ascent rate {:.1})",
                            prediction.location.y(),
                            prediction.location.x(),
                            landfall::utilities::duration_string(&prediction.time_to_landing()),
                            predictor.cda(),
                            tick.ascent_rate,
                        ),
                        log::Level::Debug,
                        log_level,
                    );
                    last_prediction = Some(prediction);
                }
            }
            Ok(None) => {}
            Err(error) => {
                report(&error.to_string(), log::Level::Error, log_level);
            }
        }

        if throttle {
            std::thread::sleep(configuration.time.interval.to_std()?);
        }
    }

    if let Some(prediction) = &last_prediction {
        report(
            &format!(
                "{:} - landing predicted at ({:.5}, {:.5}), {:} after the last fix",
                configuration.name,
                prediction.location.y(),
                prediction.location.x(),
                landfall::utilities::duration_string(&prediction.time_to_landing()),
            ),
            log::Level::Info,
            log_level,
        );
    }

    if let Some(output) = &configuration.output {
        let feature_collection = landfall::telemetry::file::fixes_geojson_featurecollection(
            fixes.iter().collect(),
            last_prediction.as_ref(),
        );
        match std::fs::write(&output.filename, feature_collection.to_string()) {
            Ok(_) => report(
                &format!(
                    "wrote telemetry and prediction to {:}",
                    output.filename.to_string_lossy()
                ),
                log::Level::Debug,
                log_level,
            ),
            Err(error) => report(&error.to_string(), log::Level::Error, log_level),
        };
    }

    Ok(())
}

fn report(message: &str, level: log::Level, log_level: log::Level) {
    if level <= log_level {
        println!(
            "{:} {:>5} {:}",
            chrono::Local::now().format(&landfall::DATETIME_FORMAT),
            level,
            message
        );
    }
}
