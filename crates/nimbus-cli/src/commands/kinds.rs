//! List the weather kinds

use anyhow::{bail, Result};
use nimbus_core::WeatherKind;
use serde::Serialize;

#[derive(Serialize)]
struct KindInfo {
    name: &'static str,
    daytime: bool,
}

pub fn run(format: &str) -> Result<()> {
    print!("{}", render_list(format)?);
    Ok(())
}

fn render_list(format: &str) -> Result<String> {
    match format {
        "text" => Ok(WeatherKind::ALL
            .iter()
            .map(|kind| format!("{}\n", kind.name()))
            .collect()),
        "json" => {
            let infos: Vec<KindInfo> = WeatherKind::ALL
                .iter()
                .map(|kind| KindInfo {
                    name: kind.name(),
                    daytime: kind.is_daytime(),
                })
                .collect();
            Ok(serde_json::to_string_pretty(&infos)? + "\n")
        }
        other => bail!("unknown format '{}'; valid values: text, json", other),
    }
}
