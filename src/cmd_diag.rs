//! Diagnostic subcommands: `resolve` and `check-profile`.

use std::path::Path;

use autoapply_config::Config;
use autoapply_core::{ProfileAccessor, YearMonth, normalize};

use crate::setup::build_resolver;

/// Print the normalized question, the resolved path and the matching tier.
pub(crate) fn resolve(config: &Config, question: &str) -> anyhow::Result<()> {
    let resolver = build_resolver(config)?;
    let normalized = normalize(question);

    println!("normalized: {}", normalized);
    match resolver.explain(&normalized) {
        Some(resolution) => {
            println!("path:       {}", resolution.path);
            println!("tier:       {}", resolution.tier);
        }
        None => println!("path:       <unresolved>"),
    }

    let table = resolver.table();
    for shadowed in table.shadowed() {
        println!(
            "shadowed:   \"{}\" -> {} (kept {})",
            shadowed.phrase, shadowed.dropped, shadowed.kept
        );
    }
    for phrase in table.unreachable() {
        println!("unreachable: \"{}\"", phrase);
    }
    Ok(())
}

/// Load a profile and summarize what the answer computer will see.
pub(crate) fn check_profile(config: &Config, path: Option<&Path>) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(|| Path::new(&config.profile.path));
    let (accessor, load_error) = ProfileAccessor::load_or_empty(path);
    let profile = accessor.profile();

    println!("profile:          {}", path.display());
    if let Some(e) = &load_error {
        println!("warning:          {} (using the empty profile)", e);
    }
    println!(
        "experience years: {}",
        accessor.aggregate_experience_years(YearMonth::now())
    );
    println!("work experiences: {}", profile.work_experiences.len());
    println!("skills:           {}", profile.skills.len());
    println!("education:        {}", profile.education.len());
    println!("location:         {}", accessor.location());
    println!("authorized:       {}", accessor.work_authorized());
    println!("relocate:         {}", accessor.willing_to_relocate());
    Ok(())
}
