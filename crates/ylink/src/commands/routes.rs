//! `ylink routes`: list the route registry.

use tabled::Tabled;

use ylink_api::{RouteDescriptor, routes};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Path")]
    path: &'static str,
}

fn row(d: &RouteDescriptor) -> RouteRow {
    RouteRow {
        key: d.key,
        method: d.method.to_string(),
        path: d.path,
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let all = routes::all();
    let out = output::render_list(global.output, all.as_slice(), row, |d| d.key.to_owned())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
