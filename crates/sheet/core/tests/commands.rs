use sheet_core::commands::{
    adjust_resource, detach_container_contents, is_rule_active, long_rest, receive_currency,
    short_rest,
};
use sheet_core::state::{
    ClassData, ContainerData, Currency, Dice, FeatData, HitDieRecord, HitPoints, Recharge,
    RechargeCalc, RechargeTime, ResourceCalc, ResourceComponent, Rule, SlotRecord,
};
use sheet_core::{
    CommandError, Component, ComponentId, ComponentKind, Effect, EffectId, EncumbranceMode, Entity,
    EntityKind, Item, ItemId, ItemKind, RulesConfig, Update, UpdateTarget, UpdateValue, derive,
};

fn second_wind(remaining: Option<i32>, time: RechargeTime) -> Item {
    Item::new("second-wind", "Second Wind", ItemKind::Feat(FeatData::default())).with_effect(
        Effect::new("second-wind-effect", "Second Wind").with_component(Component::new(
            "uses",
            ComponentKind::Resource(ResourceComponent {
                name: "Second Wind".into(),
                calc: ResourceCalc::Fixed(3),
                remaining,
                recharge: Recharge {
                    time,
                    calc: RechargeCalc::All,
                },
            }),
        )),
    )
}

fn fighter() -> Entity {
    let mut entity = Entity::new("hero", "Hero", EntityKind::Character);
    entity.system.attributes.prof = 3;
    entity.items.push(Item::new(
        "fighter",
        "Fighter",
        ItemKind::Class(ClassData {
            identifier: "fighter".into(),
            levels: 5,
            hit_die: 10,
            ..ClassData::default()
        }),
    ));
    entity.items.push(second_wind(Some(2), RechargeTime::Short));
    entity
}

fn resource_value(updates: &[Update], component: &str) -> Option<UpdateValue> {
    updates.iter().find_map(|update| match &update.target {
        UpdateTarget::Resource { component: id, .. } if id.as_str() == component => {
            Some(update.value.clone())
        }
        _ => None,
    })
}

#[test]
fn resource_adjustments_clamp_to_the_pool() {
    let entity = fighter();
    let snapshot = derive(&entity, &RulesConfig::default());
    let item = ItemId::from("second-wind");
    let effect = EffectId::from("second-wind-effect");
    let component = ComponentId::from("uses");

    let update =
        adjust_resource(&entity, &snapshot, &item, &effect, &component, -5, true).unwrap();
    assert_eq!(update.value, UpdateValue::Int(0));
    assert_eq!(
        update.target.path(),
        "items.second-wind.effects.second-wind-effect.components.uses.remaining"
    );

    let update =
        adjust_resource(&entity, &snapshot, &item, &effect, &component, 10, false).unwrap();
    assert_eq!(update.value, UpdateValue::Int(3));

    let update = adjust_resource(&entity, &snapshot, &item, &effect, &component, 1, true).unwrap();
    assert_eq!(update.value, UpdateValue::Int(3));
}

#[test]
fn adjusting_a_missing_component_fails() {
    let entity = fighter();
    let snapshot = derive(&entity, &RulesConfig::default());

    let err = adjust_resource(
        &entity,
        &snapshot,
        &"second-wind".into(),
        &"second-wind-effect".into(),
        &"nope".into(),
        1,
        true,
    )
    .unwrap_err();
    assert!(matches!(err, CommandError::ComponentNotFound { .. }));

    let err = adjust_resource(
        &entity,
        &snapshot,
        &"ghost".into(),
        &"second-wind-effect".into(),
        &"uses".into(),
        1,
        true,
    )
    .unwrap_err();
    assert_eq!(err, CommandError::ItemNotFound("ghost".into()));
}

#[test]
fn short_rest_refills_short_resources_only() {
    let mut entity = fighter();
    let mut daily = second_wind(Some(0), RechargeTime::Long);
    daily.id = "daily".into();
    daily.effects[0].uuid = "daily-effect".into();
    daily.effects[0].components[0].uuid = "daily-uses".into();
    entity.items.push(daily);

    let snapshot = derive(&entity, &RulesConfig::default());
    let rest = short_rest(&entity, &snapshot).unwrap();
    assert_eq!(resource_value(&rest.updates, "uses"), Some(UpdateValue::Int(3)));
    assert_eq!(resource_value(&rest.updates, "daily-uses"), None);

    let rest = long_rest(&entity, &snapshot).unwrap();
    assert_eq!(resource_value(&rest.updates, "uses"), Some(UpdateValue::Int(3)));
    assert_eq!(resource_value(&rest.updates, "daily-uses"), Some(UpdateValue::Int(3)));
}

#[test]
fn rolled_recharges_are_left_to_the_host() {
    let mut entity = fighter();
    let ComponentKind::Resource(resource) = &mut entity.items[1].effects[0].components[0].kind
    else {
        panic!("resource component expected");
    };
    resource.recharge.calc = RechargeCalc::Roll(Dice { count: 1, faces: 6 });

    let snapshot = derive(&entity, &RulesConfig::default());
    let rest = short_rest(&entity, &snapshot).unwrap();
    assert!(rest.updates.is_empty());
    assert_eq!(rest.pending_rolls.len(), 1);
    assert_eq!(rest.pending_rolls[0].component.as_str(), "uses");
}

#[test]
fn full_pools_need_no_recharge_roll() {
    let mut entity = fighter();
    let ComponentKind::Resource(resource) = &mut entity.items[1].effects[0].components[0].kind
    else {
        panic!("resource component expected");
    };
    resource.remaining = None;
    resource.recharge.calc = RechargeCalc::Roll(Dice { count: 1, faces: 6 });

    let snapshot = derive(&entity, &RulesConfig::default());
    let rest = short_rest(&entity, &snapshot).unwrap();
    assert!(rest.updates.is_empty());
    assert!(rest.pending_rolls.is_empty());
}

#[test]
fn hit_dice_overrides_resize_the_pool() {
    let mut entity = fighter();
    entity.system.hit_dice.insert(
        10,
        HitDieRecord {
            value: 7,
            max: 5,
            override_value: Some(8),
        },
    );
    let snapshot = derive(&entity, &RulesConfig::default());
    let d10 = snapshot.entity.hit_dice.get(&10).unwrap();
    assert_eq!((d10.value, d10.max, d10.override_value), (7, 5, Some(8)));
    assert_eq!(d10.size(), 8);

    entity.system.hit_dice.get_mut(&10).unwrap().value = 2;
    let snapshot = derive(&entity, &RulesConfig::default());
    let rest = long_rest(&entity, &snapshot).unwrap();
    let recovered = rest
        .updates
        .iter()
        .find(|update| update.target == UpdateTarget::HitDice(10))
        .map(|update| update.value.clone());
    assert_eq!(recovered, Some(UpdateValue::Int(6)));
}

#[test]
fn long_rest_restores_hit_points_slots_and_half_the_hit_dice() {
    let mut entity = fighter();
    entity.system.attributes.hp = HitPoints {
        value: 20,
        max: 44,
        temp: 5,
        tempmax: 0,
    };
    entity.system.hit_dice.insert(
        10,
        HitDieRecord {
            value: 1,
            max: 5,
            override_value: None,
        },
    );
    entity.system.spells.slots.insert(
        1,
        SlotRecord {
            value: 0,
            max: 4,
            tmp: 0,
        },
    );

    let snapshot = derive(&entity, &RulesConfig::default());
    let rest = long_rest(&entity, &snapshot).unwrap();

    let value_of = |target: UpdateTarget| {
        rest.updates
            .iter()
            .find(|update| update.target == target)
            .map(|update| update.value.clone())
    };
    assert_eq!(value_of(UpdateTarget::HitPoints), Some(UpdateValue::Int(44)));
    assert_eq!(value_of(UpdateTarget::TempHitPoints), Some(UpdateValue::Int(0)));
    assert_eq!(value_of(UpdateTarget::HitDice(10)), Some(UpdateValue::Int(3)));
    assert_eq!(value_of(UpdateTarget::SpellSlot(1)), Some(UpdateValue::Int(4)));
}

#[test]
fn currency_lands_in_the_chosen_purse() {
    let mut entity = fighter();
    entity.system.currency.gp = 10;
    let mut pouch = Item::new(
        "pouch",
        "Pouch",
        ItemKind::Container(ContainerData {
            equipped: true,
            ..ContainerData::default()
        }),
    );
    if let ItemKind::Container(data) = &mut pouch.kind {
        data.currency.sp = 4;
    }
    entity.items.push(pouch);

    let loot = Currency {
        gp: 5,
        sp: 6,
        ..Currency::default()
    };

    let update = receive_currency(&entity, &loot, None).unwrap();
    assert_eq!(update.target.path(), "system.currency");
    let UpdateValue::Currency(purse) = update.value else {
        panic!("currency update expected");
    };
    assert_eq!((purse.gp, purse.sp), (15, 6));

    let pouch_id = ItemId::from("pouch");
    let update = receive_currency(&entity, &loot, Some(&pouch_id)).unwrap();
    let UpdateValue::Currency(purse) = update.value else {
        panic!("currency update expected");
    };
    assert_eq!((purse.gp, purse.sp), (5, 10));

    let err = receive_currency(&entity, &loot, Some(&"second-wind".into())).unwrap_err();
    assert_eq!(err, CommandError::NotAContainer("second-wind".into()));
}

#[test]
fn deleting_a_container_detaches_its_contents() {
    let mut entity = fighter();
    entity.items.push(Item::new(
        "pack",
        "Backpack",
        ItemKind::Container(ContainerData::default()),
    ));
    for id in ["rope", "torch"] {
        let mut item = Item::new(id, id, ItemKind::Loot);
        item.parent = Some("pack".into());
        entity.items.push(item);
    }

    let updates = detach_container_contents(&entity, &"pack".into()).unwrap();
    let targets: Vec<_> = updates.iter().map(|update| update.target.path()).collect();
    assert_eq!(targets, vec!["items.rope.parent", "items.torch.parent"]);
    assert!(updates.iter().all(|update| update.value == UpdateValue::Clear));
}

#[test]
fn rule_queries_respect_entity_switches() {
    let rules = RulesConfig::default().with_encumbrance(EncumbranceMode::Variant);
    let mut entity = fighter();
    let mut anvil = Item::new("anvil", "Anvil", ItemKind::Loot);
    anvil.weight = 120.0;
    entity.items.push(anvil);

    let snapshot = derive(&entity, &rules);
    assert!(is_rule_active(&entity, &snapshot, Rule::HeavilyEncumbered));

    entity.system.rules.insert(Rule::HeavilyEncumbered, false);
    let snapshot = derive(&entity, &rules);
    assert!(!is_rule_active(&entity, &snapshot, Rule::HeavilyEncumbered));
}
