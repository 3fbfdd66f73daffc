//! Recompute a document and print the derived sheet.

use anyhow::Result;
use clap::Parser;
use console::style;
use sheet_core::prepare::resource::{UseMark, UsesDisplay};
use sheet_core::state::ComponentKind;
use sheet_core::{DerivedSnapshot, Entity, SheetError, derive};

use super::{Input, print_json};
use crate::config::CliConfig;

/// Recompute a document and print its derived sheet
#[derive(Parser)]
pub struct Derive {
    #[command(flatten)]
    input: Input,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable sheet
    Summary,
    /// Full snapshot as JSON
    Json,
}

impl Derive {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let (entity, rules) = self.input.load(config)?;
        let snapshot = derive(&entity, &rules);

        match self.format {
            OutputFormat::Summary => print_summary(&entity, &snapshot),
            OutputFormat::Json => print_json(&snapshot, self.pretty || config.pretty)?,
        }
        Ok(())
    }
}

fn signed(value: i32) -> String {
    format!("{value:+}")
}

fn print_summary(entity: &Entity, snapshot: &DerivedSnapshot) {
    let derived = &snapshot.entity;

    println!(
        "{} {}",
        style(&entity.name).bold().green(),
        style(format!("({})", entity.kind)).dim()
    );
    if !derived.classes.is_empty() {
        println!("{} (level {})", derived.classes, derived.level);
    }
    println!();

    println!("{}", style("Vitals:").bold().yellow());
    let hp = &derived.hp;
    println!("  HP: {}/{} (temp {})", hp.value, hp.max, hp.temp);
    println!("  AC: {}", derived.armour.ac);
    println!("  Initiative: {}", signed(derived.init.total));
    println!("  Proficiency: {}", signed(derived.prof));
    if let Some(xp) = &derived.xp {
        println!("  XP: {} / {} ({:.0}%)", xp.value, xp.max, xp.pct);
    }
    println!();

    println!("{}", style("Abilities:").bold().yellow());
    for (ability, score) in derived.abilities.iter() {
        println!(
            "  {:<4} {:>2} ({})  save {}",
            ability.as_ref().to_uppercase(),
            score.value,
            signed(score.modifier),
            signed(derived.saves[ability].save)
        );
    }
    println!();

    if !derived.skills.is_empty() {
        println!("{}", style("Skills:").bold().yellow());
        for (key, skill) in &derived.skills {
            let passive = skill
                .passive
                .map(|passive| format!(" (passive {passive})"))
                .unwrap_or_default();
            println!("  {key:<16} {}{passive}", signed(skill.total));
        }
        println!();
    }

    if !derived.attacks.is_empty() {
        println!("{}", style("Attacks:").bold().yellow());
        for attack in &derived.attacks {
            println!(
                "  {:<20} {} to hit  {}  [{}]",
                attack.name,
                signed(attack.value),
                attack.damage.join(" + "),
                attack.attack_type
            );
        }
        println!();
    }

    let resources = resource_lines(entity, snapshot);
    if !resources.is_empty() {
        println!("{}", style("Resources:").bold().yellow());
        for line in resources {
            println!("  {line}");
        }
        println!();
    }

    let conditions = &derived.conditions;
    let active: Vec<_> = conditions
        .conditions
        .iter()
        .filter(|(_, active)| **active)
        .map(|(condition, _)| condition.to_string())
        .collect();
    if !active.is_empty() || conditions.exhaustion > 0 {
        println!("{}", style("Conditions:").bold().yellow());
        if !active.is_empty() {
            println!("  {}", active.join(", "));
        }
        if conditions.exhaustion > 0 {
            println!("  exhaustion {}", conditions.exhaustion);
        }
        println!();
    }

    for line in &derived.defense_summary {
        println!("  {line}");
    }

    let load = &derived.encumbrance;
    let mut flags = Vec::new();
    if load.encumbered {
        flags.push("encumbered");
    }
    if load.heavily_encumbered {
        flags.push("heavily encumbered");
    }
    if load.over_capacity {
        flags.push("over capacity");
    }
    println!(
        "{} {:.1} / {:.1} ({:.0}%) {}",
        style("Carried:").bold().yellow(),
        load.value,
        load.max,
        load.pct,
        flags.join(", ")
    );

    if !snapshot.issues.is_empty() {
        println!();
        println!("{}", style("Issues:").bold().red());
        for issue in &snapshot.issues {
            println!("  [{}] {issue}", issue.severity().as_str());
        }
    }
}

fn resource_lines(entity: &Entity, snapshot: &DerivedSnapshot) -> Vec<String> {
    let mut lines = Vec::new();
    for item in &entity.items {
        let Some(derived) = snapshot.item(&item.id) else {
            continue;
        };
        for effect in &item.effects {
            for component in &effect.components {
                let ComponentKind::Resource(resource) = &component.kind else {
                    continue;
                };
                let Some(pool) = derived.resource(&component.uuid) else {
                    continue;
                };
                let name = if resource.name.is_empty() {
                    &item.name
                } else {
                    &resource.name
                };
                let uses = match &pool.display {
                    UsesDisplay::Hidden => continue,
                    UsesDisplay::Marks(marks) => marks
                        .iter()
                        .map(|mark| match mark {
                            UseMark::Available => '●',
                            UseMark::Used => '○',
                            UseMark::Over => '+',
                        })
                        .collect::<String>(),
                    UsesDisplay::Numeric { remaining, max } => format!("{remaining}/{max}"),
                };
                lines.push(format!("{name:<20} {uses}"));
            }
        }
    }
    lines
}
