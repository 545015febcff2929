//! Property tests: hero resources stay within their derived bounds no matter
//! which mutations run in which order.

use game_core::{
    BuffStat, DamageType, GameConfig, Hero, HeroId, HeroStats, StatBonus, mitigated,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Damage(f32, bool),
    Heal(f32),
    UseMana(f32),
    RestoreMana(f32),
    LevelUp,
    SetLevel(u32),
    Bonus(f32),
    ShrinkStats(f32, f32),
    Resistances(f32, f32),
    NonFinite(f32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-50.0f32..800.0, any::<bool>()).prop_map(|(amount, magical)| Op::Damage(amount, magical)),
        3 => (-50.0f32..800.0).prop_map(Op::Heal),
        3 => (-50.0f32..400.0).prop_map(Op::UseMana),
        2 => (-50.0f32..400.0).prop_map(Op::RestoreMana),
        2 => Just(Op::LevelUp),
        1 => (0u32..30).prop_map(Op::SetLevel),
        1 => (-100.0f32..100.0).prop_map(Op::Bonus),
        1 => (1.0f32..900.0, 0.0f32..500.0).prop_map(|(health, mana)| Op::ShrinkStats(health, mana)),
        1 => (-300.0f32..300.0, -300.0f32..300.0).prop_map(|(armor, magic_resist)| Op::Resistances(armor, magic_resist)),
        1 => prop_oneof![Just(f32::NAN), Just(f32::INFINITY), Just(f32::NEG_INFINITY)].prop_map(Op::NonFinite),
    ]
}

fn assert_bounded(hero: &Hero) {
    assert!(hero.health() >= 0.0, "health {} below zero", hero.health());
    assert!(
        hero.health() <= hero.max_health(),
        "health {} above max {}",
        hero.health(),
        hero.max_health()
    );
    assert!(hero.mana() >= 0.0, "mana {} below zero", hero.mana());
    assert!(
        hero.mana() <= hero.max_mana(),
        "mana {} above max {}",
        hero.mana(),
        hero.max_mana()
    );
    assert!((GameConfig::MIN_HERO_LEVEL..=GameConfig::MAX_HERO_LEVEL).contains(&hero.level()));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn resources_stay_within_bounds(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let mut hero = Hero::new(HeroId(1), "Garen");

        for op in ops {
            match op {
                Op::Damage(amount, magical) => {
                    let damage_type = if magical { DamageType::Magical } else { DamageType::Physical };
                    let applied = hero.take_damage(amount, damage_type);
                    prop_assert!(applied >= 0.0);
                }
                Op::Heal(amount) => {
                    let healed = hero.heal(amount);
                    prop_assert!(healed >= 0.0);
                }
                Op::UseMana(amount) => {
                    let before = hero.mana();
                    if !hero.use_mana(amount) {
                        prop_assert_eq!(hero.mana(), before);
                    }
                }
                Op::RestoreMana(amount) => hero.restore_mana(amount),
                Op::LevelUp => {
                    hero.level_up();
                }
                Op::SetLevel(level) => hero.set_level(level),
                Op::Bonus(amount) => hero.apply_bonus(StatBonus::new(BuffStat::AttackDamage, amount)),
                Op::ShrinkStats(health, mana) => hero.set_base_stats(HeroStats {
                    health,
                    mana,
                    ..HeroStats::default()
                }),
                Op::Resistances(armor, magic_resist) => hero.set_base_stats(HeroStats {
                    armor,
                    magic_resist,
                    ..HeroStats::default()
                }),
                Op::NonFinite(amount) => {
                    let was_dead = hero.is_dead();
                    prop_assert_eq!(hero.take_damage(amount, DamageType::Physical), 0.0);
                    prop_assert_eq!(hero.heal(amount), 0.0);
                    prop_assert!(!hero.use_mana(amount));
                    hero.restore_mana(amount);
                    prop_assert_eq!(hero.is_dead(), was_dead);
                }
            }
            assert_bounded(&hero);
        }
    }

    #[test]
    fn mitigated_damage_never_exceeds_input(amount in 0.0f32..10_000.0, resist in 0.0f32..1_000.0) {
        let applied = mitigated(amount, resist);
        prop_assert!(applied >= 0.0);
        prop_assert!(applied <= amount);
    }

    #[test]
    fn negative_resistance_at_most_doubles_damage(amount in 0.0f32..10_000.0, resist in -1_000.0f32..0.0) {
        let applied = mitigated(amount, resist);
        prop_assert!(applied.is_finite());
        prop_assert!(applied >= amount);
        prop_assert!(applied <= amount * 2.0 + 1e-2);
    }

    #[test]
    fn level_up_restores_thirty_percent_of_missing(damage in 0.0f32..590.0) {
        let mut hero = Hero::new(HeroId(1), "Garen");
        hero.set_base_stats(HeroStats { armor: 0.0, ..HeroStats::default() });
        hero.take_damage(damage, DamageType::Physical);

        prop_assume!(hero.level_up());
        let missing = hero.max_health() - (600.0 - damage);
        let expected = (600.0 - damage) + missing * GameConfig::LEVEL_UP_RESTORE_RATIO;
        prop_assert!((hero.health() - expected).abs() < 1e-2);
    }
}
