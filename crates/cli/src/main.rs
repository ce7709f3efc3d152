mod dispatch;
mod dto;
mod error;
mod ingest;

use std::{
    env, fs,
    io::{self, Read, Write},
    process,
};

use transit_catalogue::{
    persistence::{Database, RoutingSection},
    Catalogue, TransportRouter,
};

use crate::{dto::Envelope, error::CliError};

fn main() {
    tracing_subscriber::fmt().init();

    let mode = env::args().nth(1);
    let result = match mode.as_deref() {
        Some("build") => run_build(),
        Some("query") => run_query(),
        Some(other) => Err(CliError::InvalidSettings(format!(
            "unknown subcommand: {other}"
        ))),
        None => Err(CliError::InvalidSettings(
            "expected a subcommand: build or query".into(),
        )),
    };

    if let Err(err) = result {
        tracing::error!("{err}");
        eprintln!("{err}");
        process::exit(1);
    }
}

fn read_envelope() -> Result<Envelope, CliError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(serde_json::from_str(&input)?)
}

fn run_build() -> Result<(), CliError> {
    let envelope = read_envelope()?;
    let serialization = envelope.serialization_settings.ok_or_else(|| {
        CliError::InvalidSettings("build requires serialization_settings.file".into())
    })?;

    let mut catalogue = Catalogue::new();
    ingest::ingest(&mut catalogue, &envelope.base_requests)?;
    tracing::info!(
        "ingested {} stops and {} buses",
        catalogue.stops().len(),
        catalogue.buses().len()
    );

    let routing = if catalogue.buses().is_empty() {
        None
    } else {
        let settings = envelope.routing_settings.ok_or_else(|| {
            CliError::InvalidSettings(
                "routing_settings is required when the catalogue has buses".into(),
            )
        })?;
        let router = TransportRouter::build(&catalogue, settings)?;
        tracing::info!("built transport graph and all-pairs table");
        Some(RoutingSection {
            settings,
            graph: router.transport_graph().clone(),
            all_pairs: router.all_pairs().clone(),
        })
    };

    let database = Database {
        catalogue,
        render_settings: envelope.render_settings,
        routing,
    };
    let bytes = database.to_bytes()?;
    fs::write(&serialization.file, bytes)?;
    tracing::info!(file = %serialization.file, "persisted database");
    Ok(())
}

fn run_query() -> Result<(), CliError> {
    let envelope = read_envelope()?;
    let serialization = envelope.serialization_settings.ok_or_else(|| {
        CliError::InvalidSettings("query requires serialization_settings.file".into())
    })?;

    if !envelope.base_requests.is_empty() {
        return Err(CliError::InvalidSettings(
            "query mode cannot extend an already-persisted catalogue".into(),
        ));
    }

    let bytes = fs::read(&serialization.file)?;
    let database = Database::from_bytes(&bytes)?;
    tracing::info!(file = %serialization.file, "loaded database");

    let router = database
        .routing
        .as_ref()
        .map(|section| TransportRouter::from_parts(section.graph.clone(), section.all_pairs.clone()));
    let render_settings = envelope
        .render_settings
        .as_ref()
        .or(database.render_settings.as_ref());

    let responses: Vec<_> = envelope
        .stat_requests
        .iter()
        .map(|request| {
            dispatch::answer(
                request,
                &database.catalogue,
                router.as_ref(),
                render_settings,
            )
        })
        .collect();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer(&mut handle, &responses)?;
    handle.flush()?;
    Ok(())
}
