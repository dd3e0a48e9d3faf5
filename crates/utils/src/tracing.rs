// Copyright 2023 Ulvetanna Inc.

use crate::env::boolean_env_flag_set;

/// Installs a global `tracing` subscriber.
///
/// The filter is read from `RUST_LOG` and defaults to `info`. Setting `ZKFRI_SPAN_TIMINGS`
/// additionally logs the duration of every closed span, which is how prover and verifier
/// phases are profiled. Calling this more than once is harmless.
pub fn init_tracing() {
	use tracing_subscriber::{
		fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
	};

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let span_events = if boolean_env_flag_set("ZKFRI_SPAN_TIMINGS") {
		FmtSpan::CLOSE
	} else {
		FmtSpan::NONE
	};

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_span_events(span_events))
		.try_init();
}
