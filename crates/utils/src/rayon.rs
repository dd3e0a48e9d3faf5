// Copyright 2024 Irreducible Inc.

use std::{env, sync::OnceLock};

/// Pins rayon to the calling thread when `RAYON_NUM_THREADS=1`.
///
/// Single-threaded runs then behave as if rayon was not used at all, which keeps profiles of the
/// per-polynomial FRI work readable. Rayon refuses to initialize the global pool twice, so the
/// first result is cached and returned by reference.
pub fn adjust_thread_pool() -> &'static Result<(), rayon::ThreadPoolBuildError> {
	static ONCE_GUARD: OnceLock<Result<(), rayon::ThreadPoolBuildError>> = OnceLock::new();

	ONCE_GUARD.get_or_init(|| match env::var("RAYON_NUM_THREADS") {
		Ok(v) if v == "1" => rayon::ThreadPoolBuilder::new()
			.num_threads(1)
			.use_current_thread()
			.build_global(),
		_ => Ok(()),
	})
}
