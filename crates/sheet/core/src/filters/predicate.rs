use crate::state::{
    Ability, AbilityRef, AttackCategory, AttackRange, CheckFilter, DamageType, FilterComponent,
    RollFilter, ScoreFilter,
};

/// What a roll or score query is about.
///
/// A predicate is evaluated against each filter component of an effect; all
/// conditions a filter declares must hold for it to match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// Matches every filter component.
    Any,
    Attack {
        range: AttackRange,
        category: AttackCategory,
    },
    Damage {
        range: Option<AttackRange>,
        category: Option<AttackCategory>,
        damage: Option<DamageType>,
    },
    AbilityCheck(Ability),
    SkillCheck {
        skill: String,
        ability: Ability,
    },
    ToolCheck {
        tool: String,
        ability: Ability,
    },
    Initiative(Ability),
    Save(Ability),
    AbilityScore(Ability),
    Ac,
    MaxHp,
    Passive(String),
    Carry,
    Dc(Option<AbilityRef>),
    SpellAttack,
    Proficiency,
}

impl Predicate {
    pub fn attack(range: AttackRange, category: AttackCategory) -> Self {
        Predicate::Attack { range, category }
    }

    pub fn damage(
        range: Option<AttackRange>,
        category: Option<AttackCategory>,
        damage: Option<DamageType>,
    ) -> Self {
        Predicate::Damage {
            range,
            category,
            damage,
        }
    }

    pub fn skill(skill: impl Into<String>, ability: Ability) -> Self {
        Predicate::SkillCheck {
            skill: skill.into(),
            ability,
        }
    }

    pub fn tool(tool: impl Into<String>, ability: Ability) -> Self {
        Predicate::ToolCheck {
            tool: tool.into(),
            ability,
        }
    }

    pub fn passive(skill: impl Into<String>) -> Self {
        Predicate::Passive(skill.into())
    }

    /// Evaluates this predicate against one filter component.
    pub fn matches(&self, filter: &FilterComponent) -> bool {
        match (self, filter) {
            (Predicate::Any, _) => true,
            (Predicate::Attack { range, category }, FilterComponent::Roll(roll)) => match roll {
                RollFilter::Attack {
                    range: ranges,
                    category: categories,
                } => ranges.contains(range) && categories.contains(category),
                _ => false,
            },
            (
                Predicate::Damage {
                    range,
                    category,
                    damage,
                },
                FilterComponent::Roll(RollFilter::Damage {
                    range: ranges,
                    category: categories,
                    damage: damages,
                }),
            ) => {
                ranges.contains_opt(range.as_ref())
                    && categories.contains_opt(category.as_ref())
                    && damages.contains_opt(damage.as_ref())
            }
            (Predicate::Save(ability), FilterComponent::Roll(RollFilter::Save(abilities))) => {
                abilities.contains(ability)
            }
            (_, FilterComponent::Roll(RollFilter::Check(check))) => self.matches_check(check),
            (_, FilterComponent::Score(score)) => self.matches_score(score),
            _ => false,
        }
    }

    fn matches_check(&self, check: &CheckFilter) -> bool {
        match (self, check) {
            (Predicate::AbilityCheck(ability), CheckFilter::Ability(abilities))
            | (Predicate::SkillCheck { ability, .. }, CheckFilter::Ability(abilities))
            | (Predicate::ToolCheck { ability, .. }, CheckFilter::Ability(abilities))
            | (Predicate::Initiative(ability), CheckFilter::Ability(abilities)) => {
                abilities.contains(ability)
            }
            (
                Predicate::SkillCheck { skill, ability },
                CheckFilter::Skill {
                    skill: skills,
                    ability: abilities,
                },
            ) => skills.contains(skill) && abilities.contains(ability),
            (
                Predicate::ToolCheck { tool, ability },
                CheckFilter::Tool {
                    tool: tools,
                    ability: abilities,
                },
            ) => tools.contains(tool) && abilities.contains(ability),
            (Predicate::Initiative(_), CheckFilter::Initiative) => true,
            _ => false,
        }
    }

    fn matches_score(&self, score: &ScoreFilter) -> bool {
        match (self, score) {
            (Predicate::AbilityScore(ability), ScoreFilter::Ability(abilities)) => {
                abilities.contains(ability)
            }
            (Predicate::Ac, ScoreFilter::Ac)
            | (Predicate::MaxHp, ScoreFilter::MaxHp)
            | (Predicate::Carry, ScoreFilter::Carry)
            | (Predicate::SpellAttack, ScoreFilter::SpellAttack)
            | (Predicate::Proficiency, ScoreFilter::Proficiency) => true,
            (Predicate::Passive(skill), ScoreFilter::Passive(skills)) => skills.contains(skill),
            (Predicate::Dc(source), ScoreFilter::Dc(sources)) => {
                sources.contains_opt(source.as_ref())
            }
            _ => false,
        }
    }
}
