//! One recomputation cycle.

use std::collections::BTreeMap;

use tracing::{debug, info_span, trace};

use crate::config::RulesConfig;
use crate::env::{ActivationOracle, StandardActivation, is_usable};
use crate::error::Diagnostics;
use crate::filters::{ActiveEffect, FilterIndex, Predicate};
use crate::prepare::items::ItemDerived;
use crate::prepare::rolls::{RollKind, condition_modes};
use crate::prepare::{self, ClassContext, Context};
use crate::state::{Ability, ComponentKind, EffectId, Entity, Item, ItemId, ItemKind, Rule};
use crate::stats::{RollModSummary, StatContext};

use super::index::ItemIndex;
use super::snapshot::{AttackEntry, DerivedSnapshot, EffectRef, EffectStatus, EntityDerived};

/// Index plus activation state of every effect.
pub struct Collated<'a> {
    pub index: ItemIndex<'a>,
    pub statuses: BTreeMap<EffectId, EffectStatus>,
    /// Effects that feed the owner's filter queries, in document order.
    pub active: Vec<ActiveEffect<'a>>,
}

/// Indexes the item tree and asks the oracle which effects are active.
pub fn collate<'a, A>(entity: &'a Entity, oracle: &A, issues: &mut Diagnostics) -> Collated<'a>
where
    A: ActivationOracle + ?Sized,
{
    let index = ItemIndex::build(entity, issues);
    let mut statuses = BTreeMap::new();
    let mut active = Vec::new();

    for item in &entity.items {
        for effect in &item.effects {
            if statuses.contains_key(&effect.uuid) {
                continue;
            }
            let status = EffectStatus {
                active: oracle.is_active(item, effect),
                toggleable: effect.is_toggleable(),
                applied: effect.is_applied(),
            };
            if status.contributes() {
                active.push(ActiveEffect { item, effect });
            }
            statuses.insert(effect.uuid.clone(), status);
        }
    }

    Collated {
        index,
        statuses,
        active,
    }
}

/// Derives the full snapshot of an entity.
///
/// Holds the ruleset and the activation oracle; each call to
/// [`derive`](Self::derive) is an independent cycle.
#[derive(Clone, Copy, Debug)]
pub struct DerivationEngine<'r, A: ActivationOracle + ?Sized> {
    rules: &'r RulesConfig,
    activation: &'r A,
}

impl<'r, A: ActivationOracle + ?Sized> DerivationEngine<'r, A> {
    pub fn new(rules: &'r RulesConfig, activation: &'r A) -> Self {
        Self { rules, activation }
    }

    pub fn rules(&self) -> &RulesConfig {
        self.rules
    }

    pub fn derive(&self, entity: &Entity) -> DerivedSnapshot {
        let span = info_span!(
            "derive",
            entity = %entity.id,
            kind = %entity.kind,
            items = entity.items.len()
        );
        let _guard = span.enter();

        let mut issues = Diagnostics::default();
        let collated = collate(entity, self.activation, &mut issues);
        debug!(
            effects = collated.statuses.len(),
            active = collated.active.len(),
            "indexed item tree"
        );

        let filters = FilterIndex::new(collated.active.iter().copied());
        let classes = ClassContext::build(entity);
        let level = prepare::classes::character_level(entity, &classes);
        let mut stats = StatContext {
            prof: entity.system.attributes.prof,
            modifiers: entity
                .system
                .abilities
                .map(|_, score| Ability::modifier(score.value)),
            level,
            class_levels: classes.levels_by_id(),
            spellcasting: entity.system.attributes.spellcasting,
        };
        debug!(level, classes = %classes.display(), "class pass complete");

        let derivation = Derivation {
            entity,
            rules: self.rules,
            index: &collated.index,
            filters: &filters,
            classes: &classes,
        };
        let mut derived = derivation.entity_pass(&mut stats, &mut issues);
        debug!(prof = derived.prof, ac = derived.armour.ac, "entity pass complete");

        let cx = derivation.context(&stats);
        let items = derivation.item_pass(&cx, &collated.statuses, &derived, &mut issues);
        debug!(items = items.len(), "item pass complete");

        derivation.aggregate(&collated, &items, &mut derived);
        let issues = issues.into_issues();
        if !issues.is_empty() {
            debug!(issues = issues.len(), "cycle finished with issues");
        }

        DerivedSnapshot {
            entity: derived,
            items,
            issues,
        }
    }
}

/// Derives `entity` with the default activation rules.
pub fn derive(entity: &Entity, rules: &RulesConfig) -> DerivedSnapshot {
    DerivationEngine::new(rules, &StandardActivation).derive(entity)
}

/// In-cycle working buffer; dropped when the cycle ends.
struct Derivation<'c, 'a> {
    entity: &'a Entity,
    rules: &'c RulesConfig,
    index: &'c ItemIndex<'a>,
    filters: &'c FilterIndex<'a>,
    classes: &'c ClassContext<'a>,
}

impl<'c, 'a> Derivation<'c, 'a> {
    fn context<'s>(&self, stats: &'s StatContext) -> Context<'s, 'a>
    where
        'c: 's,
    {
        Context {
            entity: self.entity,
            rules: self.rules,
            index: self.index,
            filters: self.filters,
            classes: self.classes,
            stats,
        }
    }

    /// Entity fields in dependency order; `stats` is refined as proficiency
    /// and ability scores become final.
    fn entity_pass(&self, stats: &mut StatContext, issues: &mut Diagnostics) -> EntityDerived {
        let entity = self.entity;
        let mut derived = EntityDerived {
            level: stats.level,
            ..EntityDerived::default()
        };

        derived.prof = prepare::vitals::proficiency(&self.context(stats), issues);
        stats.prof = derived.prof;

        let mut abilities = prepare::abilities::scores(&self.context(stats), issues);
        stats.modifiers = abilities.map(|_, ability| ability.modifier);
        trace!(modifiers = ?stats.modifiers, "ability scores final");

        let cx = self.context(stats);
        prepare::abilities::checks(&cx, &mut abilities, issues);
        derived.hp = prepare::vitals::hit_points(&cx, issues);
        derived.xp = prepare::vitals::experience(&cx);
        derived.armour = prepare::armour::armour(&cx, &abilities, issues);
        derived.init = prepare::initiative::initiative(&cx, &abilities, issues);

        let mut defenses = prepare::defenses::defenses(&cx);
        derived.conditions = prepare::conditions::conditions(&cx, &mut defenses);
        derived.defense_summary = defenses.summary();
        derived.defenses = defenses;

        let check_modes = condition_modes(&derived.conditions, RollKind::AbilityCheck);
        for ability in Ability::ALL {
            abilities[ability].check.roll_mod = RollModSummary::combine(
                check_modes.iter().copied(),
                &cx.filters.mods(&Predicate::AbilityCheck(ability)),
            );
        }
        let init_ability = entity.system.attributes.init.ability;
        derived.init.roll_mod = RollModSummary::combine(
            check_modes.iter().copied(),
            &cx.filters.mods(&Predicate::Initiative(init_ability)),
        );

        if !entity.is_vehicle() {
            derived.skills = prepare::skills::skills(
                &cx,
                &abilities,
                &derived.armour,
                &derived.conditions,
                issues,
            );
        }
        derived.saves = prepare::saves::saves(&cx, &abilities, &derived.conditions, issues);
        derived.inventory = prepare::inventory::inventory(&cx, issues);
        derived.encumbrance =
            prepare::inventory::encumbrance(&cx, &abilities, &derived.inventory, issues);
        if entity.is_character() {
            derived.hit_dice = prepare::hit_dice::hit_dice(&cx);
            derived.tools = prepare::skills::tools(&cx, &abilities, &derived.conditions, issues);
        }
        derived.spellcasting = prepare::spellcasting::spellcasting(&cx, issues);
        derived.abilities = abilities;

        derived.rules = self.rule_outcomes(&derived);
        derived
    }

    fn rule_outcomes(&self, derived: &EntityDerived) -> BTreeMap<Rule, bool> {
        [
            (Rule::HeavyArmour, derived.armour.heavy_armour),
            (Rule::NoisyArmour, derived.armour.noisy_armour),
            (Rule::Encumbered, derived.encumbrance.encumbered),
            (Rule::HeavilyEncumbered, derived.encumbrance.heavily_encumbered),
            (Rule::OverCapacity, derived.encumbrance.over_capacity),
        ]
        .into_iter()
        .map(|(rule, holds)| (rule, holds && self.entity.rule_enabled(rule)))
        .collect()
    }

    /// Every item's components: class items first, then the rest.
    fn item_pass(
        &self,
        cx: &Context<'_, 'a>,
        statuses: &BTreeMap<EffectId, EffectStatus>,
        derived: &EntityDerived,
        issues: &mut Diagnostics,
    ) -> BTreeMap<ItemId, ItemDerived> {
        let is_class = |item: &&Item| matches!(item.kind, ItemKind::Class(_));
        let classes = self.entity.items.iter().filter(is_class);
        let others = self.entity.items.iter().filter(|item| !is_class(item));

        let mut items = BTreeMap::new();
        for item in classes.chain(others) {
            if items.contains_key(&item.id) {
                continue;
            }
            let prepared =
                prepare::items::prepare_item(cx, item, statuses, &derived.conditions, issues);
            items.insert(item.id.clone(), prepared);
        }
        items
    }

    fn aggregate(
        &self,
        collated: &Collated<'a>,
        items: &BTreeMap<ItemId, ItemDerived>,
        derived: &mut EntityDerived,
    ) {
        derived.classes = self.classes.display();

        for item in &self.entity.items {
            let Some(prepared) = items.get(&item.id) else {
                continue;
            };
            let usable = is_usable(item);
            for effect in &item.effects {
                if collated
                    .statuses
                    .get(&effect.uuid)
                    .is_some_and(|status| status.toggleable && !status.applied)
                {
                    derived.toggleable.push(EffectRef {
                        item: item.id.clone(),
                        effect: effect.uuid.clone(),
                    });
                }

                if !usable {
                    continue;
                }
                let damage: Vec<String> = effect
                    .components
                    .iter()
                    .filter(|c| matches!(c.kind, ComponentKind::Damage(_)))
                    .filter_map(|c| prepared.damage(&c.uuid))
                    .map(|damage| damage.display.clone())
                    .collect();
                for component in &effect.components {
                    let Some(attack) = prepared.attack(&component.uuid) else {
                        continue;
                    };
                    derived.attacks.push(AttackEntry {
                        item: item.id.clone(),
                        effect: effect.uuid.clone(),
                        component: component.uuid.clone(),
                        name: item.name.clone(),
                        attack_type: attack.attack_type,
                        value: attack.value,
                        damage: damage.clone(),
                    });
                }
            }

            if let ItemKind::Feat(feat) = &item.kind {
                if let Some(trigger) = feat.trigger {
                    derived
                        .triggers
                        .entry(trigger)
                        .or_default()
                        .push(item.id.clone());
                }
            }
        }

        derived.collections = collated
            .index
            .by_type()
            .map(|(item_type, items)| {
                let ids = items.iter().map(|item| item.id.clone()).collect();
                (item_type.as_ref().to_owned(), ids)
            })
            .collect();
    }
}
