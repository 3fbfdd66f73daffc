use std::fs;
use std::path::PathBuf;

use sheet_content::{DocumentFormat, EntityLoader, RulesLoader};
use sheet_core::{EncumbranceMode, EntityKind, ItemId, RulesConfig, derive};
use tempfile::TempDir;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn sample_fighter_derives() {
    let entity = EntityLoader::load(&data_dir().join("entities/brakka.ron")).unwrap();
    let rules = RulesLoader::load(&data_dir().join("rules/standard.toml")).unwrap();

    assert_eq!(entity.kind, EntityKind::Character);
    assert_eq!(entity.items.len(), 7);

    let snapshot = derive(&entity, &rules);
    assert!(snapshot.issues.is_empty());
    assert_eq!(snapshot.entity.level, 5);
    assert_eq!(snapshot.entity.armour.ac, 17);
    assert_eq!(snapshot.entity.classes, "Champion Fighter 5");

    let longsword = snapshot.item(&"longsword".into()).unwrap();
    assert_eq!(longsword.attack(&"longsword-attack".into()).unwrap().value, 7);

    let backpack = snapshot
        .entity
        .inventory
        .containers
        .get(&ItemId::from("backpack"))
        .unwrap();
    assert_eq!(backpack.contents, vec![ItemId::from("rope")]);
}

#[test]
fn sample_rulesets_parse() {
    let standard = RulesLoader::load(&data_dir().join("rules/standard.toml")).unwrap();
    assert_eq!(standard.encumbrance, EncumbranceMode::CapacityOnly);

    let variant = RulesLoader::load(&data_dir().join("rules/variant.toml")).unwrap();
    assert_eq!(variant.encumbrance, EncumbranceMode::Variant);
    assert!(variant.coin_weight);
    assert_eq!(variant.xp_table, RulesConfig::default().xp_table);
}

#[test]
fn empty_ruleset_is_the_default() {
    assert_eq!(RulesLoader::parse("").unwrap(), RulesConfig::default());
}

#[test]
fn invalid_ruleset_is_rejected() {
    let err = RulesLoader::parse("carry_multiplier = -1.0").unwrap_err();
    assert!(err.to_string().contains("carry_multiplier"));

    assert!(RulesLoader::parse("cantrip_tiers = [11, 5]").is_err());
    assert!(RulesLoader::parse("encumbrance = \"Sometimes\"").is_err());
}

#[test]
fn format_follows_the_extension() {
    assert_eq!(
        DocumentFormat::from_path(&PathBuf::from("hero.RON")).unwrap(),
        DocumentFormat::Ron
    );
    assert!(DocumentFormat::from_path(&PathBuf::from("hero.yaml")).is_err());
}

#[cfg(feature = "json")]
#[test]
fn json_documents_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scout.json");
    fs::write(
        &path,
        r#"{
            "id": "scout",
            "name": "Scout",
            "kind": "Npc",
            "system": { "attributes": { "prof": 2 } },
            "items": [
                { "id": "dagger", "name": "Dagger", "kind": { "Weapon": { "equipped": true } } }
            ]
        }"#,
    )
    .unwrap();

    let entity = EntityLoader::load(&path).unwrap();
    assert_eq!(entity.kind, EntityKind::Npc);
    assert_eq!(entity.items[0].quantity, 1);
    assert_eq!(derive(&entity, &RulesConfig::default()).entity.prof, 2);
}

#[test]
fn directory_loads_in_name_order() {
    let dir = TempDir::new().unwrap();
    for (file, id) in [("b.ron", "second"), ("a.ron", "first")] {
        let document = format!("(id: \"{id}\", name: \"{id}\")");
        fs::write(dir.path().join(file), document).unwrap();
    }
    fs::write(dir.path().join("notes.txt"), "not a document").unwrap();

    let entities = EntityLoader::load_dir(dir.path()).unwrap();
    let ids: Vec<_> = entities.iter().map(|entity| entity.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second"]);
}

#[test]
fn parse_errors_name_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.ron");
    fs::write(&path, "(id: ").unwrap();

    let err = EntityLoader::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.ron"));
}
