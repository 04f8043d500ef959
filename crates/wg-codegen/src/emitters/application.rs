use std::sync::OnceLock;

use minijinja::{Environment, UndefinedBehavior, context};

use crate::GeneratedFile;
use crate::config::EntryPointConfig;

const TEMPLATE_NAME: &str = "wundergraph.application.ts.j2";

/// Inputs for the generated application entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationOptions {
    /// File name of the emitted entry point, e.g. `wundergraph.application.ts`.
    pub file_name: String,
    /// Import specifier of the config module, e.g. `../wundergraph.config`.
    pub config_module: String,
    /// Import specifier of the server module, e.g. `../wundergraph.server`.
    pub server_module: String,
    /// Whether the server module is imported and passed to the factory.
    pub has_server_config: bool,
}

impl ApplicationOptions {
    pub fn from_config(config: &EntryPointConfig, has_server_config: bool) -> Self {
        Self {
            file_name: config.application_file.clone(),
            config_module: config.config_module(),
            server_module: config.server_module(),
            has_server_config,
        }
    }
}

/// Shared environment holding the compiled entry point template.
fn environment() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        // No block trimming: the conditional import keeps its own line.
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(
            TEMPLATE_NAME,
            include_str!("../../templates/wundergraph.application.ts.j2"),
        )
        .expect("template should be valid");
        env
    })
}

/// Emit `wundergraph.application.ts`, which hands the config (and server, if
/// any) to `createWunderGraphApplication`.
pub fn emit_application(options: &ApplicationOptions) -> Result<GeneratedFile, minijinja::Error> {
    let tmpl = environment().get_template(TEMPLATE_NAME)?;
    let content = tmpl.render(context! {
        config_module => options.config_module,
        server_module => options.server_module,
        has_server_config => options.has_server_config,
    })?;

    Ok(GeneratedFile {
        path: options.file_name.clone(),
        content,
    })
}
