use std::fmt::{self, Write};

use serde::Serialize;
use sfm_model::{CountryId, Equilibrium, Report, Summary};

/// Renders the report as aligned console text.
pub fn text(report: &Report) -> String {
    TextReport(report).to_string()
}

/// Console text layout of a [`Report`].
struct TextReport<'a>(&'a Report);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        write_equilibrium(f, "Baseline equilibrium", &report.baseline)?;

        for shock in &report.shocks {
            f.write_char('\n')?;
            match &shock.outcome {
                Ok(comparison) => write_summary(f, &shock.shock.name, &comparison.summary())?,
                Err(error) => {
                    writeln!(f, "Shock: {}", shock.shock.name)?;
                    writeln!(f, "  failed: {error}")?;
                }
            }
        }

        Ok(())
    }
}

/// Renders the report as pretty-printed JSON.
pub fn json(report: &Report) -> serde_json::Result<String> {
    #[derive(Serialize)]
    struct JsonReport<'a> {
        baseline: &'a Equilibrium,
        shocks: Vec<JsonShock<'a>>,
    }

    #[derive(Serialize)]
    struct JsonShock<'a> {
        name: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        equilibrium: Option<&'a Equilibrium>,
        #[serde(skip_serializing_if = "Option::is_none")]
        changes: Option<Summary>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    }

    let shocks = report
        .shocks
        .iter()
        .map(|shock| match &shock.outcome {
            Ok(comparison) => JsonShock {
                name: &shock.shock.name,
                equilibrium: Some(comparison.shocked()),
                changes: Some(comparison.summary()),
                error: None,
            },
            Err(error) => JsonShock {
                name: &shock.shock.name,
                equilibrium: None,
                changes: None,
                error: Some(error.to_string()),
            },
        })
        .collect();

    serde_json::to_string_pretty(&JsonReport {
        baseline: &report.baseline,
        shocks,
    })
}

fn write_equilibrium(out: &mut impl Write, title: &str, eq: &Equilibrium) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(
        out,
        "  relative price (p_M / p_A)   {:>10.6}   ({} iterations)",
        eq.price(),
        eq.iters()
    )?;
    writeln!(out, "  relative world output        {:>10.6}", eq.relative_world_output())?;

    for id in CountryId::ALL {
        let country = eq.country(id);
        let real = eq.real_wage(id);
        writeln!(out, "  {id}")?;
        writeln!(
            out,
            "    wage {:>9.4}   real wage (A) {:>9.4}   real wage (M) {:>9.4}",
            country.wage, real.agriculture, real.manufacturing
        )?;
        writeln!(
            out,
            "    L_M  {:>9.4}   L_A {:>9.4}   Y_M {:>9.4}   Y_A {:>9.4}",
            country.labor.manufacturing,
            country.labor.agriculture,
            country.output.manufacturing,
            country.output.agriculture
        )?;
    }

    Ok(())
}

fn write_summary(out: &mut impl Write, name: &str, summary: &Summary) -> fmt::Result {
    writeln!(out, "Shock: {name}")?;
    writeln!(
        out,
        "  relative price          {:>10.6} -> {:>10.6}   {:>+8.2}%",
        summary.price.baseline,
        summary.price.shocked,
        summary.price.percent()
    )?;
    writeln!(
        out,
        "  relative world output   {:>10.6} -> {:>10.6}   {:>+8.2}%",
        summary.relative_world_output.baseline,
        summary.relative_world_output.shocked,
        summary.relative_world_output.percent()
    )?;

    for (id, changes) in summary.countries.iter() {
        writeln!(out, "  {id}")?;
        writeln!(
            out,
            "    wage {:>+8.2}%   real wage (A) {:>+8.2}%   real wage (M) {:>+8.2}%",
            changes.wage.percent(),
            changes.real_wage.agriculture.percent(),
            changes.real_wage.manufacturing.percent()
        )?;
        writeln!(
            out,
            "    Y_M  {:>+8.2}%   Y_A {:>+8.2}%   labor moved to manufacturing {:>+9.4}",
            changes.output.manufacturing.percent(),
            changes.output.agriculture.percent(),
            changes.labor_moved_to_manufacturing
        )?;
    }

    Ok(())
}
