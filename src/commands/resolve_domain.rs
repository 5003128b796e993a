use anyhow::Result;
use serde_json::json;
use stackplan::domain::services::DomainResolver;
use stackplan::presentation::output;

pub fn cmd_resolve_domain(
    stage: &str,
    root: &str,
    base: &str,
    production_label: &str,
    json: bool,
) -> Result<()> {
    let resolver = DomainResolver::new(production_label);
    let zone_name = resolver.resolve(stage, root, base);

    if json {
        output::emit(&json!({
            "stage": stage,
            "production": resolver.is_production_stage(stage),
            "child_zone_name": zone_name,
        }))?;
    } else {
        println!("{}", zone_name);
    }
    Ok(())
}
