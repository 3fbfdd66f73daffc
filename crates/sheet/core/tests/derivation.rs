use sheet_core::error::ReferenceKind;
use sheet_core::state::{
    AbilityRef, AbilityScore, ActiveStatus, ArmourData, ArmourKind, AttackCategory,
    AttackComponent, AttackRange, BonusComponent, CheckFilter, ClassData, ClassSpellcasting,
    ConditionComponent, ConditionKind, ConsumableData, ConsumableKind, DamageComponent,
    DamageType, DcCalc, EquipmentData, FeatData, FilterComponent, MultiplierComponent, Operator,
    Proficiency, Progression, ResourceCalc, ResourceComponent, ResourceSource, RollFilter, Rule,
    SaveComponent, ScalingComponent, ScalingMode, ScoreFilter, Selection, SetterComponent, Size,
    SpellData, WeaponCategory, WeaponData, WeaponTags,
};
use sheet_core::{
    Ability, Component, ComponentKind, DerivationEngine, DerivationIssue, Effect,
    EncumbranceMode, Entity, EntityKind, Item, ItemId, ItemKind, PartLabel, RulesConfig,
    StandardActivation, derive,
};

fn fighter() -> Entity {
    let mut entity = Entity::new("hero", "Hero", EntityKind::Character);
    entity.system.attributes.prof = 3;
    entity.system.abilities.str = AbilityScore {
        value: 16,
        proficient: 1.0,
    };
    entity.system.abilities.con = AbilityScore {
        value: 14,
        proficient: 1.0,
    };

    entity.items.push(Item::new(
        "fighter",
        "Fighter",
        ItemKind::Class(ClassData {
            identifier: "fighter".into(),
            levels: 5,
            hit_die: 10,
            subclass: Some("Champion".into()),
            spellcasting: None,
        }),
    ));

    let longsword = Item::new(
        "longsword",
        "Longsword +1",
        ItemKind::Weapon(WeaponData {
            equipped: true,
            category: WeaponCategory::Martial,
            tags: WeaponTags::VERSATILE,
            magic_bonus: 1,
            ..WeaponData::default()
        }),
    )
    .with_effect(
        Effect::new("swing", "Swing")
            .with_component(Component::new(
                "swing-attack",
                ComponentKind::Attack(AttackComponent {
                    attack: AttackRange::Melee,
                    ability: Some(Ability::Str.into()),
                    proficient: true,
                    ..AttackComponent::default()
                }),
            ))
            .with_component(Component::new(
                "swing-damage",
                ComponentKind::Damage(DamageComponent {
                    ndice: 1,
                    die: 8,
                    ability: Some(Ability::Str.into()),
                    damage: Some(DamageType::Slashing),
                    ..DamageComponent::default()
                }),
            )),
    );
    entity.items.push(longsword);
    entity
}

fn feat(id: &str, effect: Effect) -> Item {
    Item::new(id, id, ItemKind::Feat(FeatData::default())).with_effect(effect)
}

fn strength_filter(uuid: &str) -> Component {
    Component::new(
        uuid,
        ComponentKind::Filter(FilterComponent::Score(ScoreFilter::Ability(
            Selection::only([Ability::Str]),
        ))),
    )
}

fn temp_condition(uuid: &str, condition: ConditionKind) -> Component {
    Component::new(
        uuid,
        ComponentKind::Condition(ConditionComponent {
            condition,
            temp: true,
        }),
    )
}

#[test]
fn fighter_longsword_attack_lists_its_parts() {
    let entity = fighter();
    let snapshot = derive(&entity, &RulesConfig::default());

    assert_eq!(snapshot.entity.level, 5);
    assert_eq!(snapshot.entity.prof, 3);
    assert_eq!(snapshot.entity.abilities.str.modifier, 3);

    let item = snapshot.item(&"longsword".into()).unwrap();
    let attack = item.attack(&"swing-attack".into()).unwrap();
    let labels: Vec<_> = attack.parts.iter().map(|part| part.label.clone()).collect();
    assert_eq!(
        labels,
        vec![
            PartLabel::Bonus,
            PartLabel::Ability(Ability::Str),
            PartLabel::Proficiency,
        ]
    );
    let modifiers: Vec<_> = attack.parts.iter().map(|part| part.modifier).collect();
    assert_eq!(modifiers, vec![1.0, 3.0, 3.0]);
    assert_eq!(attack.value, 7);

    let damage = item.damage(&"swing-damage".into()).unwrap();
    assert_eq!(damage.display, "1d8+4");

    let entry = snapshot
        .entity
        .attacks
        .iter()
        .find(|entry| entry.item.as_str() == "longsword")
        .unwrap();
    assert_eq!(entry.value, 7);
    assert_eq!(entry.damage, vec!["1d8+4".to_owned()]);
}

#[test]
fn class_line_and_hit_dice_follow_class_items() {
    let snapshot = derive(&fighter(), &RulesConfig::default());
    assert_eq!(snapshot.entity.classes, "Champion Fighter 5");

    let d10 = snapshot.entity.hit_dice.get(&10).unwrap();
    assert_eq!(d10.max, 5);
    assert_eq!(d10.value, 5);
}

#[test]
fn saving_throws_add_proficiency_when_trained() {
    let snapshot = derive(&fighter(), &RulesConfig::default());
    assert_eq!(snapshot.entity.saves.str.save, 6);
    assert_eq!(snapshot.entity.saves.con.save, 5);
    assert_eq!(snapshot.entity.saves.dex.save, 0);
}

#[test]
fn recomputation_is_idempotent() {
    let entity = fighter();
    let rules = RulesConfig::default();
    let engine = DerivationEngine::new(&rules, &StandardActivation);

    let first = engine.derive(&entity);
    let second = engine.derive(&entity);
    assert_eq!(first, second);
}

#[cfg(feature = "serde")]
#[test]
fn identical_cycles_share_a_digest() {
    let entity = fighter();
    let rules = RulesConfig::default();

    let first = derive(&entity, &rules).digest().unwrap();
    let second = derive(&entity, &rules).digest().unwrap();
    assert_eq!(hex::encode(first), hex::encode(second));

    let mut changed = entity.clone();
    changed.system.abilities.str.value = 18;
    assert_ne!(derive(&changed, &rules).digest().unwrap(), first);
}

#[test]
fn higher_skill_proficiency_wins() {
    let mut entity = fighter();
    entity.system.skills.entries.insert(
        "athletics".into(),
        Proficiency {
            ability: Ability::Str,
            value: 0.5,
            ..Proficiency::default()
        },
    );
    entity.items.push(feat(
        "expertise",
        Effect::new("expertise-effect", "Expertise")
            .with_component(Component::new(
                "athletics-only",
                ComponentKind::Filter(FilterComponent::Roll(RollFilter::Check(
                    CheckFilter::Skill {
                        skill: Selection::only(["athletics".to_owned()]),
                        ability: Selection::Any,
                    },
                ))),
            ))
            .with_component(Component::new(
                "double",
                ComponentKind::Bonus(BonusComponent {
                    prof: 2.0,
                    ..BonusComponent::default()
                }),
            )),
    ));

    let snapshot = derive(&entity, &RulesConfig::default());
    let athletics = snapshot.entity.skills.get("athletics").unwrap();

    let proficiency: Vec<_> = athletics
        .parts
        .iter()
        .filter(|part| part.is_proficiency())
        .collect();
    assert_eq!(proficiency.len(), 1);
    assert_eq!(proficiency[0].proficiency, Some(2.0));
    assert_eq!(proficiency[0].modifier, 6.0);
    assert_eq!(athletics.total, 9);
}

#[test]
fn score_pipeline_runs_bonus_then_multiplier_then_setter() {
    let mut entity = fighter();
    entity.system.abilities.str.value = 10;
    entity.items.push(feat(
        "giant-blood",
        Effect::new("giant-blood-effect", "Giant Blood")
            .with_component(strength_filter("giant-str"))
            .with_component(Component::new(
                "plus-two",
                ComponentKind::Bonus(BonusComponent::flat(2.0)),
            ))
            .with_component(Component::new(
                "double",
                ComponentKind::Multiplier(MultiplierComponent { multiplier: 2.0 }),
            )),
    ));

    let rules = RulesConfig::default();
    let snapshot = derive(&entity, &rules);
    assert_eq!(snapshot.entity.abilities.str.value, 24);
    assert_eq!(snapshot.entity.abilities.str.modifier, 7);

    entity.items.push(feat(
        "enfeebled",
        Effect::new("enfeebled-effect", "Enfeebled")
            .with_component(strength_filter("enfeebled-str"))
            .with_component(Component::new(
                "set-five",
                ComponentKind::Setter(SetterComponent { setter: 5.0 }),
            )),
    ));
    let snapshot = derive(&entity, &rules);
    assert_eq!(snapshot.entity.abilities.str.value, 5);
    assert_eq!(snapshot.entity.abilities.str.modifier, -3);
}

#[test]
fn disabled_effects_do_not_contribute() {
    let mut entity = fighter();
    let mut effect = Effect::new("bull-effect", "Bull's Strength")
        .with_component(strength_filter("bull-str"))
        .with_component(Component::new(
            "plus-four",
            ComponentKind::Bonus(BonusComponent::flat(4.0)),
        ));
    effect.enabled = false;
    entity.items.push(feat("bull", effect));

    let snapshot = derive(&entity, &RulesConfig::default());
    assert_eq!(snapshot.entity.abilities.str.value, 16);
}

fn loaded(weight: f64) -> Entity {
    let mut entity = Entity::new("mule", "Mule", EntityKind::Character);
    let mut sack = Item::new("sack", "Sack of stones", ItemKind::Loot);
    sack.weight = weight;
    entity.items.push(sack);
    entity
}

#[test]
fn variant_encumbrance_sets_threshold_flags() {
    // Str 10, medium: capacity 150, encumbered at 50, heavily at 100.
    let rules = RulesConfig::default().with_encumbrance(EncumbranceMode::Variant);
    let snapshot = derive(&loaded(60.0), &rules);

    let encumbrance = &snapshot.entity.encumbrance;
    assert_eq!(encumbrance.max, 150.0);
    assert_eq!(encumbrance.value, 60.0);
    assert!(encumbrance.encumbered);
    assert!(!encumbrance.heavily_encumbered);
    assert!(!encumbrance.over_capacity);
    assert!(snapshot.rule(Rule::Encumbered));
}

#[test]
fn capacity_only_ignores_thresholds() {
    let rules = RulesConfig::default().with_encumbrance(EncumbranceMode::CapacityOnly);

    let snapshot = derive(&loaded(120.0), &rules);
    assert!(!snapshot.entity.encumbrance.encumbered);
    assert!(!snapshot.entity.encumbrance.heavily_encumbered);
    assert!(!snapshot.entity.encumbrance.over_capacity);

    let snapshot = derive(&loaded(150.0), &rules);
    assert!(snapshot.entity.encumbrance.over_capacity);
}

#[test]
fn switched_off_rules_never_hold() {
    let rules = RulesConfig::default().with_encumbrance(EncumbranceMode::Variant);
    let mut entity = loaded(60.0);
    entity.system.rules.insert(Rule::Encumbered, false);

    let snapshot = derive(&entity, &rules);
    assert!(snapshot.entity.encumbrance.encumbered);
    assert!(!snapshot.rule(Rule::Encumbered));
}

#[test]
fn temporary_exhaustion_stacks_and_clamps() {
    let mut entity = fighter();
    entity.statuses.push(ActiveStatus::new("exhaust2"));
    for n in 0..3 {
        entity.items.push(feat(
            &format!("curse{n}"),
            Effect::new(format!("curse{n}-effect"), format!("Curse {n}"))
                .with_component(temp_condition(&format!("tired{n}"), ConditionKind::Exhaustion)),
        ));
    }

    let rules = RulesConfig::default();
    let snapshot = derive(&entity, &rules);
    assert_eq!(snapshot.entity.conditions.exhaustion, 5);

    for n in 3..6 {
        entity.items.push(feat(
            &format!("curse{n}"),
            Effect::new(format!("curse{n}-effect"), format!("Curse {n}"))
                .with_component(temp_condition(&format!("tired{n}"), ConditionKind::Exhaustion)),
        ));
    }
    let snapshot = derive(&entity, &rules);
    assert_eq!(snapshot.entity.conditions.exhaustion, 6);

    entity
        .system
        .defenses
        .condition_immunities
        .push(ConditionKind::Exhaustion);
    let snapshot = derive(&entity, &rules);
    assert_eq!(snapshot.entity.conditions.exhaustion, 0);
}

#[test]
fn immunity_blocks_temporary_conditions() {
    let mut entity = fighter();
    entity.items.push(feat(
        "hex",
        Effect::new("hex-effect", "Hex")
            .with_component(temp_condition("fear", ConditionKind::Frightened)),
    ));

    let snapshot = derive(&entity, &RulesConfig::default());
    assert!(snapshot.entity.conditions.has(ConditionKind::Frightened));

    entity
        .system
        .defenses
        .condition_immunities
        .push(ConditionKind::Frightened);
    let snapshot = derive(&entity, &RulesConfig::default());
    assert!(!snapshot.entity.conditions.has(ConditionKind::Frightened));
}

#[test]
fn dangling_parent_lands_at_the_root() {
    let mut entity = loaded(1.0);
    entity.items[0].parent = Some("lost-bag".into());

    let snapshot = derive(&entity, &RulesConfig::default());
    assert_eq!(snapshot.entity.inventory.root, vec![ItemId::from("sack")]);
    assert!(!snapshot.issues.is_empty());
}

fn set_weapon(entity: &mut Entity, id: &str, update: impl FnOnce(&mut WeaponData)) {
    let item = entity.items.iter_mut().find(|item| item.id.as_str() == id).unwrap();
    let ItemKind::Weapon(weapon) = &mut item.kind else {
        panic!("weapon expected");
    };
    update(weapon);
}

fn arrows(magic_bonus: i32) -> Item {
    Item::new(
        "arrows",
        "Arrows +1",
        ItemKind::Consumable(ConsumableData {
            kind: ConsumableKind::Ammunition,
            magic_bonus,
        }),
    )
}

#[test]
fn ammunition_magic_adds_to_attack_and_damage() {
    let mut entity = fighter();
    set_weapon(&mut entity, "longsword", |weapon| {
        weapon.ammo = Some("arrows".into());
    });
    entity.items.push(arrows(1));

    let snapshot = derive(&entity, &RulesConfig::default());
    let longsword = snapshot.item(&"longsword".into()).unwrap();
    assert_eq!(longsword.attack(&"swing-attack".into()).unwrap().value, 8);

    let damage = longsword.damage(&"swing-damage".into()).unwrap();
    assert_eq!(damage.display, "1d8+5");
    let magic: Vec<_> = damage
        .parts
        .iter()
        .filter(|part| part.label == PartLabel::Magic)
        .map(|part| part.modifier)
        .collect();
    assert_eq!(magic, vec![2.0]);
}

#[test]
fn missing_ammunition_is_reported_once() {
    let mut entity = fighter();
    set_weapon(&mut entity, "longsword", |weapon| {
        weapon.ammo = Some("quiver".into());
    });

    let snapshot = derive(&entity, &RulesConfig::default());
    let longsword = snapshot.item(&"longsword".into()).unwrap();
    assert_eq!(longsword.attack(&"swing-attack".into()).unwrap().value, 7);
    assert_eq!(longsword.damage(&"swing-damage".into()).unwrap().display, "1d8+4");

    let ammunition: Vec<_> = snapshot
        .issues
        .iter()
        .filter(|issue| {
            matches!(
                issue,
                DerivationIssue::MissingReference {
                    kind: ReferenceKind::Ammunition,
                    ..
                }
            )
        })
        .collect();
    assert_eq!(ammunition.len(), 1);
}

fn spell(id: &str, data: SpellData) -> Item {
    Item::new(id, id, ItemKind::Spell(data)).with_effect(
        Effect::new(format!("{id}-cast"), id)
            .with_component(Component::new(
                format!("{id}-attack"),
                ComponentKind::Attack(AttackComponent {
                    attack: AttackRange::Ranged,
                    category: AttackCategory::Spell,
                    ability: Some(AbilityRef::Spell),
                    proficient: true,
                    ..AttackComponent::default()
                }),
            ))
            .with_component(Component::new(
                format!("{id}-damage"),
                ComponentKind::Damage(DamageComponent {
                    ndice: 1,
                    die: 10,
                    damage: Some(DamageType::Fire),
                    ..DamageComponent::default()
                }),
            )),
    )
}

fn listed(entity: &Entity) -> Vec<String> {
    derive(entity, &RulesConfig::default())
        .entity
        .attacks
        .iter()
        .map(|entry| entry.item.to_string())
        .collect()
}

#[test]
fn only_usable_items_list_attacks() {
    let mut entity = fighter();
    entity.items.push(spell(
        "scorching-ray",
        SpellData {
            level: 2,
            ..SpellData::default()
        },
    ));
    entity.items.push(spell(
        "guiding-bolt",
        SpellData {
            level: 1,
            prepared: true,
            ..SpellData::default()
        },
    ));
    entity.items.push(spell("fire-bolt", SpellData::default()));

    assert_eq!(listed(&entity), vec!["longsword", "guiding-bolt", "fire-bolt"]);

    set_weapon(&mut entity, "longsword", |weapon| weapon.equipped = false);
    assert_eq!(listed(&entity), vec!["guiding-bolt", "fire-bolt"]);

    let snapshot = derive(&entity, &RulesConfig::default());
    let longsword = snapshot.item(&"longsword".into()).unwrap();
    assert!(longsword.attack(&"swing-attack".into()).is_some());
}

#[test]
fn cantrip_damage_gains_dice_by_tier() {
    let mut entity = fighter();
    let mut fire_bolt = spell("fire-bolt", SpellData::default());
    fire_bolt.effects[0] = fire_bolt.effects[0].clone().with_component(Component::new(
        "fire-bolt-scaling",
        ComponentKind::Scaling(ScalingComponent {
            mode: ScalingMode::Cantrip,
            reference: None,
            ndice: vec![1],
        }),
    ));
    entity.items.push(fire_bolt);

    let damage_at = |entity: &Entity| {
        derive(entity, &RulesConfig::default())
            .item(&"fire-bolt".into())
            .unwrap()
            .damage(&"fire-bolt-damage".into())
            .unwrap()
            .display
            .clone()
    };
    assert_eq!(damage_at(&entity), "2d10");

    class_levels(&mut entity, 11);
    assert_eq!(damage_at(&entity), "3d10");

    class_levels(&mut entity, 4);
    assert_eq!(damage_at(&entity), "1d10");
}

fn class_levels(entity: &mut Entity, levels: u32) {
    let ItemKind::Class(class) = &mut entity.items[0].kind else {
        panic!("class expected");
    };
    class.levels = levels;
}

fn armour(id: &str, data: ArmourData, magic_bonus: i32) -> Item {
    Item::new(
        id,
        id,
        ItemKind::Equipment(EquipmentData {
            equipped: true,
            armour: Some(data),
            magic_bonus,
        }),
    )
}

#[test]
fn armour_class_caps_dex_and_stacks_shields() {
    let mut entity = fighter();
    entity.system.abilities.dex.value = 18;
    let rules = RulesConfig::default();
    assert_eq!(derive(&entity, &rules).entity.armour.ac, 14);

    entity.items.push(armour(
        "breastplate",
        ArmourData {
            kind: ArmourKind::Medium,
            value: 14,
            add_dex: true,
            max_dex: Some(2),
            strength: None,
            stealth: false,
        },
        1,
    ));
    assert_eq!(derive(&entity, &rules).entity.armour.ac, 17);

    entity.items.push(armour(
        "shield",
        ArmourData {
            kind: ArmourKind::Shield,
            value: 2,
            add_dex: false,
            max_dex: None,
            strength: None,
            stealth: false,
        },
        0,
    ));
    let snapshot = derive(&entity, &rules);
    assert_eq!(snapshot.entity.armour.ac, 19);
    assert_eq!(snapshot.entity.armour.display, "breastplate, shield");

    entity.system.attributes.ac.override_value = Some(12);
    assert_eq!(derive(&entity, &rules).entity.armour.ac, 12);
}

fn wizard() -> Entity {
    let mut entity = Entity::new("mage", "Mage", EntityKind::Character);
    entity.system.attributes.prof = 3;
    entity.system.abilities.int.value = 16;
    entity.items.push(Item::new(
        "wizard",
        "Wizard",
        ItemKind::Class(ClassData {
            identifier: "wizard".into(),
            levels: 5,
            hit_die: 6,
            subclass: None,
            spellcasting: Some(ClassSpellcasting {
                ability: Ability::Int,
                progression: Progression::Full,
            }),
        }),
    ));

    let mut fireball = Item::new(
        "fireball",
        "Fireball",
        ItemKind::Spell(SpellData {
            level: 3,
            prepared: true,
            always: false,
        }),
    )
    .with_effect(
        Effect::new("fireball-cast", "Fireball")
            .with_component(Component::new(
                "fireball-save",
                ComponentKind::Save(SaveComponent {
                    dc: DcCalc::default(),
                    save: Some(Ability::Dex),
                }),
            ))
            .with_component(Component::new(
                "fireball-fixed",
                ComponentKind::Save(SaveComponent {
                    dc: DcCalc::Fixed(13),
                    save: Some(Ability::Dex),
                }),
            )),
    );
    fireball.source_class = Some("wizard".into());
    entity.items.push(fireball);
    entity
}

#[test]
fn save_dc_adds_proficiency_and_casting_ability() {
    let mut entity = wizard();
    let dc_of = |entity: &Entity, component: &str| {
        derive(entity, &RulesConfig::default())
            .item(&"fireball".into())
            .unwrap()
            .dc(&component.into())
            .unwrap()
            .clone()
    };

    let dc = dc_of(&entity, "fireball-save");
    assert_eq!(dc.value, 14);
    assert_eq!(dc.spell_mod, Some(3));
    assert_eq!(dc_of(&entity, "fireball-fixed").value, 13);

    entity.items.push(feat(
        "spell-focus",
        Effect::new("spell-focus-effect", "Spell Focus")
            .with_component(Component::new(
                "spell-dcs",
                ComponentKind::Filter(FilterComponent::Score(ScoreFilter::Dc(Selection::only([
                    AbilityRef::Spell,
                ])))),
            ))
            .with_component(Component::new(
                "plus-one",
                ComponentKind::Bonus(BonusComponent::flat(1.0)),
            )),
    ));
    assert_eq!(dc_of(&entity, "fireball-save").value, 15);
    assert_eq!(dc_of(&entity, "fireball-fixed").value, 13);
}

#[test]
fn petrification_grants_immunities_and_resistance() {
    let mut entity = fighter();
    let snapshot = derive(&entity, &RulesConfig::default());
    assert!(snapshot.entity.defenses.resistances.is_empty());

    entity.statuses.push(ActiveStatus::new("petrified"));
    let snapshot = derive(&entity, &RulesConfig::default());
    let defenses = &snapshot.entity.defenses;

    assert!(snapshot.entity.conditions.has(ConditionKind::Petrified));
    assert!(defenses.condition_immunities.contains(&ConditionKind::Poisoned));
    assert!(defenses.condition_immunities.contains(&ConditionKind::Diseased));
    for damage in [DamageType::Slashing, DamageType::Fire, DamageType::Psychic] {
        assert!(defenses.resistances.contains(&damage));
    }
}

fn pool(uuid: &str, calc: ResourceCalc) -> Component {
    Component::new(
        uuid,
        ComponentKind::Resource(ResourceComponent {
            name: uuid.into(),
            calc,
            ..ResourceComponent::default()
        }),
    )
}

fn formula(source: ResourceSource, operator: Operator, bonus: f64, min: i32) -> ResourceCalc {
    ResourceCalc::Formula {
        source,
        operator,
        bonus,
        min,
    }
}

#[test]
fn formula_resources_follow_their_source() {
    let mut entity = fighter();
    entity.items.push(feat(
        "pools",
        Effect::new("pools-effect", "Pools")
            .with_component(pool(
                "by-class",
                formula(ResourceSource::ClassLevels("fighter".into()), Operator::Plus, 0.0, 1),
            ))
            .with_component(pool(
                "by-prof",
                formula(ResourceSource::Proficiency, Operator::Mult, 2.0, 0),
            ))
            .with_component(pool(
                "by-str",
                formula(ResourceSource::Ability(Ability::Str), Operator::Plus, 1.0, 0),
            ))
            .with_component(pool(
                "by-missing-class",
                formula(ResourceSource::ClassLevels("rogue".into()), Operator::Plus, 0.0, 1),
            )),
    ));

    let snapshot = derive(&entity, &RulesConfig::default());
    let pools = snapshot.item(&"pools".into()).unwrap();
    let max = |uuid: &str| pools.resource(&uuid.into()).unwrap().max;

    assert_eq!(max("by-class"), 5);
    assert_eq!(max("by-prof"), 6);
    assert_eq!(max("by-str"), 4);
    assert_eq!(max("by-missing-class"), 1);
    assert_eq!(pools.resource(&"by-class".into()).unwrap().remaining, 5);
    assert!(snapshot.issues.iter().any(|issue| matches!(
        issue,
        DerivationIssue::MissingReference {
            kind: ReferenceKind::Class,
            ..
        }
    )));
}

#[test]
fn size_scales_capacity_but_not_variant_thresholds() {
    // Str 10, large: capacity 300, encumbered still at 50.
    let rules = RulesConfig::default().with_encumbrance(EncumbranceMode::Variant);
    let mut entity = loaded(60.0);
    entity.system.size = Size::Large;

    let snapshot = derive(&entity, &rules);
    let encumbrance = &snapshot.entity.encumbrance;
    assert_eq!(encumbrance.max, 300.0);
    assert!(encumbrance.encumbered);
    assert!(!encumbrance.heavily_encumbered);
}
