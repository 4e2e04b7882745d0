/* src/controller/refresh.rs */

//!
//! Periodic background refresh.

use std::sync::{Arc, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[cfg(feature = "logging")]
use log::{debug, info};

use crate::holder::Origin;

use super::RefreshError;
use super::loader::{Bindable, Loader, Shared};

/// Handle to a running refresh loop.
pub(crate) struct RefreshTask {
	stop: oneshot::Sender<()>,
	abort_handle: AbortHandle,
}

impl RefreshTask {
	pub(crate) fn abort(self) {
		self.abort_handle.abort();
	}
}

impl<T> Loader<T>
where
	T: Bindable,
{
	/// Starts rebuilding the configuration every `interval`.
	///
	/// Each tick binds a brand-new `T::default()` through all three layers.
	/// Only when every layer succeeds does the new instance become active
	/// and get passed to `on_update`. Failed ticks are discarded without a
	/// trace and the previous instance stays in force. Callbacks run on the
	/// refresh task, one at a time.
	///
	/// Must be called from within a tokio runtime.
	pub fn start_auto_refresh<F>(&self, interval: Duration, on_update: F) -> Result<(), RefreshError>
	where
		F: Fn(Arc<T>) + Send + Sync + 'static,
	{
		if interval.is_zero() {
			return Err(RefreshError::ZeroInterval);
		}
		let runtime = Handle::try_current().map_err(|_| RefreshError::NoRuntime)?;

		let mut task = self.refresh.lock().unwrap_or_else(PoisonError::into_inner);
		if task.is_some() {
			return Err(RefreshError::AlreadyRunning);
		}

		*self
			.shared
			.on_update
			.write()
			.unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(on_update));

		let (stop_tx, stop_rx) = oneshot::channel();
		let handle = runtime.spawn(run(Arc::clone(&self.shared), interval, stop_rx));
		*task = Some(RefreshTask {
			stop: stop_tx,
			abort_handle: handle.abort_handle(),
		});

		#[cfg(feature = "logging")]
		info!("Started config auto refresh every {:?}", interval);
		Ok(())
	}

	/// Signals the refresh loop to exit after any in-flight tick.
	///
	/// Fails with [`RefreshError::NotRunning`] when no loop is active, which
	/// includes a second call after a stop.
	pub fn stop_auto_refresh(&self) -> Result<(), RefreshError> {
		let task = self
			.refresh
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.take()
			.ok_or(RefreshError::NotRunning)?;

		// The loop may already be gone if the runtime shut down.
		let _ = task.stop.send(());

		#[cfg(feature = "logging")]
		info!("Stopped config auto refresh");
		Ok(())
	}

	/// Returns true while a refresh loop is active.
	pub fn is_refreshing(&self) -> bool {
		self.refresh
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.is_some()
	}
}

async fn run<T>(shared: Arc<Shared<T>>, period: Duration, mut stop: oneshot::Receiver<()>)
where
	T: Bindable,
{
	let mut ticker = time::interval_at(Instant::now() + period, period);
	ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

	loop {
		tokio::select! {
			biased;
			// Fires on stop and also when the loader is dropped.
			_ = &mut stop => break,
			_ = ticker.tick() => tick(&shared).await,
		}
	}
}

async fn tick<T>(shared: &Shared<T>)
where
	T: Bindable,
{
	let mut fresh = T::default();
	if shared.apply_layers(&mut fresh).await.is_err() {
		return;
	}

	let fresh = Arc::new(fresh);
	let _meta = shared.slot.replace(Arc::clone(&fresh), Origin::Refresh);

	#[cfg(feature = "logging")]
	debug!("Refreshed config (version {})", _meta.version);

	let callback = shared
		.on_update
		.read()
		.unwrap_or_else(PoisonError::into_inner)
		.clone();
	if let Some(callback) = callback {
		callback(fresh);
	}
}
