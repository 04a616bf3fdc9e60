//! CLI domain: parse, route, output, and presentation only.
//! Generation itself lives in the library; the route table only wires it up.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_generate_json, format_generate_text, format_inspect_json, format_inspect_text,
    format_vehicles_json, format_vehicles_text, GenerateReport, InspectReport,
};
pub use route::RunContext;
