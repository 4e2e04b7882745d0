/* tests/schema_tests.rs */

use std::time::Duration;

use stratum::layer::{MapEnv, apply_defaults, apply_env};
use stratum::schema::{CoerceError, FieldInfo, Kind, describe};
use stratum::{BindError, Rules, Schema, Walker};

#[derive(Debug, Clone, Default, PartialEq)]
struct Limits {
	max_conns: u16,
	ratio: f64,
}

impl Schema for Limits {
	fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), BindError> {
		w.field("max_conns", &mut self.max_conns, Rules::new().default("64").env("LIM_CONNS"))?;
		w.field("ratio", &mut self.ratio, Rules::new().default("0.5").env("LIM_RATIO"))
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Tls {
	cert: String,
}

impl Schema for Tls {
	fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), BindError> {
		w.field("cert", &mut self.cert, Rules::new().default("server.pem").env("TLS_CERT"))
	}
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Settings {
	port: i32,
	verbose: bool,
	timeout: Duration,
	retry_delay: Duration,
	hosts: Vec<String>,
	limits: Limits,
	tls: Option<Tls>,
	// Not registered, so never bound.
	secret: String,
}

impl Schema for Settings {
	fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), BindError> {
		w.field("port", &mut self.port, Rules::new().default("5").env("SET_PORT"))?;
		w.field("verbose", &mut self.verbose, Rules::new().env("SET_VERBOSE"))?;
		w.field("timeout", &mut self.timeout, Rules::new().default("5s").env("SET_TIMEOUT"))?;
		w.field("retry_delay", &mut self.retry_delay, Rules::new().default("5"))?;
		w.field("hosts", &mut self.hosts, Rules::new().default("a, b ,c").env("SET_HOSTS"))?;
		w.nested("limits", &mut self.limits)?;
		w.optional("tls", &mut self.tls)
	}
}

#[test]
fn test_describe_lists_leaves() {
	let fields = describe::<Settings>().unwrap();
	let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
	assert_eq!(
		paths,
		[
			"port",
			"verbose",
			"timeout",
			"retry_delay",
			"hosts",
			"limits.max_conns",
			"limits.ratio"
		]
	);

	assert_eq!(
		fields[5],
		FieldInfo {
			path: "limits.max_conns".to_string(),
			kind: Kind::Uint,
			default: Some("64"),
			env: Some("LIM_CONNS"),
		}
	);
	assert_eq!(fields[1].default, None);
	assert_eq!(fields[2].kind, Kind::Duration);
	assert_eq!(fields[4].kind, Kind::StringList);
}

#[test]
fn test_defaults_fill_zero_fields() {
	let mut settings = Settings::default();
	apply_defaults(&mut settings).unwrap();

	assert_eq!(settings.port, 5);
	assert!(!settings.verbose);
	assert_eq!(settings.timeout, Duration::from_secs(5));
	assert_eq!(settings.hosts, ["a", "b", "c"]);
	assert_eq!(settings.limits.max_conns, 64);
	assert_eq!(settings.limits.ratio, 0.5);
	assert!(settings.secret.is_empty());
}

#[test]
fn test_duration_default_prefers_integer() {
	let mut settings = Settings::default();
	apply_defaults(&mut settings).unwrap();

	// A bare integer is taken as nanoseconds, a literal as a duration.
	assert_eq!(settings.retry_delay, Duration::from_nanos(5));
	assert_eq!(settings.timeout, Duration::from_secs(5));
}

#[test]
fn test_defaults_keep_non_zero_fields() {
	let mut settings = Settings {
		port: 42,
		hosts: vec!["x".to_string()],
		..Settings::default()
	};
	apply_defaults(&mut settings).unwrap();
	assert_eq!(settings.port, 42);
	assert_eq!(settings.hosts, ["x"]);

	let once = settings.clone();
	apply_defaults(&mut settings).unwrap();
	assert_eq!(settings, once);
}

#[test]
fn test_optional_structs_are_not_allocated() {
	let mut settings = Settings::default();
	apply_defaults(&mut settings).unwrap();
	assert!(settings.tls.is_none());

	let mut settings = Settings {
		tls: Some(Tls::default()),
		..Settings::default()
	};
	apply_defaults(&mut settings).unwrap();
	assert_eq!(settings.tls.unwrap().cert, "server.pem");
}

#[test]
fn test_env_overrides_unconditionally() {
	let env: MapEnv = [
		("SET_PORT", "9090"),
		("SET_VERBOSE", "1"),
		("SET_TIMEOUT", "1m30s"),
		("SET_HOSTS", " one,two "),
		("LIM_RATIO", "0.25"),
		("TLS_CERT", "/etc/tls.pem"),
	]
	.into_iter()
	.collect();

	let mut settings = Settings {
		port: 1,
		tls: Some(Tls::default()),
		..Settings::default()
	};
	apply_env(&mut settings, &env).unwrap();

	assert_eq!(settings.port, 9090);
	assert!(settings.verbose);
	assert_eq!(settings.timeout, Duration::from_secs(90));
	assert_eq!(settings.hosts, ["one", "two"]);
	assert_eq!(settings.limits.ratio, 0.25);
	assert_eq!(settings.tls.unwrap().cert, "/etc/tls.pem");
}

#[test]
fn test_env_ignores_unset_and_empty() {
	let env = MapEnv::new();
	env.set("SET_PORT", "");

	let mut settings = Settings {
		port: 7,
		..Settings::default()
	};
	apply_env(&mut settings, &env).unwrap();
	assert_eq!(settings.port, 7);
	assert!(settings.hosts.is_empty());
}

#[test]
fn test_env_binding_error() {
	let env: MapEnv = [("LIM_CONNS", "70000")].into_iter().collect();
	let mut settings = Settings::default();

	let err = apply_env(&mut settings, &env).unwrap_err();
	assert_eq!(err.path, "limits.max_conns");
	assert_eq!(err.env.as_deref(), Some("LIM_CONNS"));
	assert!(matches!(err.source, CoerceError::Int { .. }));
	assert!(err.to_string().contains("from env LIM_CONNS"));
}

#[test]
fn test_env_rejects_bad_values() {
	for (key, raw) in [
		("SET_PORT", "abc"),
		("SET_VERBOSE", "yes"),
		("SET_TIMEOUT", "soon"),
		("LIM_RATIO", "half"),
	] {
		let env: MapEnv = [(key, raw)].into_iter().collect();
		let mut settings = Settings::default();
		assert!(
			apply_env(&mut settings, &env).is_err(),
			"{key}={raw:?} should be rejected"
		);
	}
}

#[derive(Debug, Default)]
struct Broken {
	retries: u8,
	name: String,
}

impl Schema for Broken {
	fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), BindError> {
		w.field("retries", &mut self.retries, Rules::new().default("many"))?;
		w.field("name", &mut self.name, Rules::new().default("after"))
	}
}

#[test]
fn test_bad_default_aborts_walk() {
	let mut broken = Broken::default();
	let err = apply_defaults(&mut broken).unwrap_err();
	assert_eq!(err.path, "retries");
	assert_eq!(err.env, None);
	// Later fields are not visited once a field fails.
	assert!(broken.name.is_empty());
}

#[derive(Debug, Default)]
struct Pool {
	name: String,
	limits: Box<Limits>,
}

impl Schema for Pool {
	fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), BindError> {
		w.field("name", &mut self.name, Rules::new().default("pool"))?;
		w.nested("limits", &mut self.limits)
	}
}

#[test]
fn test_boxed_schemas_are_walked() {
	let mut pool = Pool::default();
	apply_defaults(&mut pool).unwrap();
	assert_eq!(pool.name, "pool");
	assert_eq!(pool.limits.max_conns, 64);

	let env: MapEnv = [("LIM_RATIO", "0.75")].into_iter().collect();
	apply_env(&mut pool, &env).unwrap();
	assert_eq!(pool.limits.ratio, 0.75);

	let paths: Vec<String> = describe::<Pool>()
		.unwrap()
		.into_iter()
		.map(|f| f.path)
		.collect();
	assert_eq!(paths, ["name", "limits.max_conns", "limits.ratio"]);
}

#[derive(Debug, Default)]
struct Guarded {
	port: u16,
}

impl Schema for Guarded {
	fn walk(&mut self, w: &mut Walker<'_>) -> Result<(), BindError> {
		w.field("port", &mut self.port, Rules::new().default("80"))?;
		Err(BindError::new("mode", None, CoerceError::Bool("maybe".to_string())))
	}
}

#[test]
fn test_describe_surfaces_walk_errors() {
	let err = describe::<Guarded>().unwrap_err();
	assert_eq!(err.path, "mode");
	assert_eq!(err.source, CoerceError::Bool("maybe".to_string()));
}
