/* demos/basic.rs */

use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use stratum::{BindError, Loader, Rules, Schema, Walker};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Database {
	url: String,
	pool_size: u32,
}

impl Schema for Database {
	fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), BindError> {
		w.field("url", &mut self.url, Rules::new().default("postgres://localhost/demo").env("DEMO_DB_URL"))?;
		w.field("pool_size", &mut self.pool_size, Rules::new().default("5").env("DEMO_DB_POOL"))
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AppConfig {
	name: String,
	port: i64,
	#[serde(with = "stratum::schema::duration")]
	timeout: Duration,
	features: Vec<String>,
	database: Database,
}

impl Schema for AppConfig {
	fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), BindError> {
		w.field("name", &mut self.name, Rules::new().default("stratum-demo"))?;
		w.field("port", &mut self.port, Rules::new().default("8080").env("APP_PORT"))?;
		w.field("timeout", &mut self.timeout, Rules::new().default("5s").env("APP_TIMEOUT"))?;
		w.field("features", &mut self.features, Rules::new().env("APP_FEATURES"))?;
		w.nested("database", &mut self.database)
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 0. Prepare a real file
	let config_path = "demo_config.yaml";
	fs::write(config_path, "port: 9000\ndatabase:\n  pool_size: 20\n")?;
	println!("Created {}", config_path);

	// 1. Build the loader
	let loader = Loader::<AppConfig>::with_file(config_path);

	// 2. Initial load (defaults, then file, then environment)
	let mut config = AppConfig::default();
	if let Err(e) = loader.must_load(&mut config).await {
		eprintln!("{}", e);
		std::process::exit(1);
	}
	println!("Initial config: {:?}", config);

	// 3. Refresh every 2 seconds
	loader.start_auto_refresh(Duration::from_secs(2), |config| {
		println!("Refreshed config: {:?}", config);
	})?;

	println!(
		"Refreshing from {} and the environment... (Edit the file to see updates)",
		config_path
	);
	println!("Waiting 20 seconds...");
	tokio::time::sleep(Duration::from_secs(20)).await;

	// Cleanup
	loader.stop_auto_refresh()?;
	fs::remove_file(config_path)?;
	println!("Done.");
	Ok(())
}
