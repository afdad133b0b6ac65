use chipfold_core::{
    score_hand, Card, EffectCondition, EffectKind, EffectTrigger, Edition, Enhancement, HandKind,
    Joker, JokerEffect, JokerRarity, Rank, RuleEffect, ScoreTables, ScoringContext, SpecialRule,
    Suit,
};

fn make_cards(specs: &[(Suit, Rank)]) -> Vec<Card> {
    specs
        .iter()
        .map(|(suit, rank)| Card::standard(*suit, *rank))
        .collect()
}

fn make_joker(id: &str, effects: Vec<JokerEffect>) -> Joker {
    Joker {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        rarity: JokerRarity::Common,
        effects,
        edition: None,
        active: true,
        counter: None,
        special: None,
    }
}

fn simple_effect(kind: EffectKind, trigger: EffectTrigger, value: f64) -> JokerEffect {
    JokerEffect {
        kind,
        trigger,
        value,
        condition: None,
    }
}

fn base_context(hand: HandKind) -> ScoringContext {
    ScoringContext {
        discards: 3,
        money: 4,
        ..ScoringContext::new(hand)
    }
}

#[test]
fn pair_base_values_only() {
    let ctx = base_context(HandKind::Pair);
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    assert_eq!(breakdown.base.chips, 10);
    assert_eq!(breakdown.base.mult, 2.0);
    assert_eq!(breakdown.final_chips, 10);
    assert_eq!(breakdown.final_mult, 2.0);
    assert_eq!(breakdown.total_score, 20);
    assert_eq!(breakdown.steps.len(), 1);
}

#[test]
fn high_card_with_ace_and_king() {
    let mut ctx = base_context(HandKind::HighCard);
    ctx.played = make_cards(&[(Suit::Spades, Rank::Ace), (Suit::Spades, Rank::King)]);
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    assert_eq!(breakdown.final_chips, 26);
    assert_eq!(breakdown.final_mult, 1.0);
    assert_eq!(breakdown.total_score, 26);
    assert_eq!(breakdown.card_chips, 21);
}

#[test]
fn plain_joker_adds_four_mult() {
    let mut ctx = base_context(HandKind::HighCard);
    ctx.played = make_cards(&[(Suit::Spades, Rank::Ace), (Suit::Spades, Rank::King)]);
    ctx.jokers = vec![make_joker(
        "joker",
        vec![simple_effect(
            EffectKind::AdditiveMult,
            EffectTrigger::Always,
            4.0,
        )],
    )];
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    assert_eq!(breakdown.joker_mult, 4.0);
    assert_eq!(breakdown.final_mult, 5.0);
    assert_eq!(breakdown.total_score, 130);
}

#[test]
fn banner_pays_per_remaining_discard() {
    let banner = make_joker(
        "banner",
        vec![simple_effect(
            EffectKind::AdditiveChips,
            EffectTrigger::PerDiscard,
            30.0,
        )],
    );

    let mut empty = base_context(HandKind::HighCard);
    empty.jokers = vec![banner.clone()];
    let without_cards = score_hand(&empty, &ScoreTables::default());
    assert_eq!(without_cards.joker_chips, 90);

    let mut full = base_context(HandKind::FullHouse);
    full.played = make_cards(&[
        (Suit::Hearts, Rank::Two),
        (Suit::Clubs, Rank::Two),
        (Suit::Spades, Rank::Two),
        (Suit::Hearts, Rank::Nine),
        (Suit::Clubs, Rank::Nine),
    ]);
    full.jokers = vec![banner];
    let with_cards = score_hand(&full, &ScoreTables::default());
    assert_eq!(with_cards.joker_chips, 90);
}

#[test]
fn mystic_summit_requires_spent_discards() {
    let summit = make_joker(
        "mystic_summit",
        vec![JokerEffect {
            kind: EffectKind::AdditiveMult,
            trigger: EffectTrigger::PerDiscard,
            value: 15.0,
            condition: Some(EffectCondition {
                max_cards: Some(0),
                ..EffectCondition::default()
            }),
        }],
    );

    let mut spent = base_context(HandKind::HighCard);
    spent.discards = 0;
    spent.jokers = vec![summit.clone()];
    assert_eq!(score_hand(&spent, &ScoreTables::default()).joker_mult, 15.0);

    let mut unspent = base_context(HandKind::HighCard);
    unspent.discards = 1;
    unspent.jokers = vec![summit];
    assert_eq!(score_hand(&unspent, &ScoreTables::default()).joker_mult, 0.0);
}

#[test]
fn stone_suppresses_rank_chips_only() {
    let mut ctx = base_context(HandKind::HighCard);
    let mut stone_ace = Card::standard(Suit::Spades, Rank::Ace);
    stone_ace.enhancement = Some(Enhancement::Stone);
    ctx.played = vec![stone_ace];
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    // 5 base + 50 stone, never the ace's 11.
    assert_eq!(breakdown.final_chips, 55);
    assert!(breakdown
        .steps
        .iter()
        .all(|step| step.effect != RuleEffect::AddChips(11)));
}

#[test]
fn stone_still_carries_an_edition() {
    let mut ctx = base_context(HandKind::HighCard);
    let mut card = Card::standard(Suit::Spades, Rank::Ace);
    card.enhancement = Some(Enhancement::Stone);
    card.edition = Some(Edition::Foil);
    ctx.played = vec![card];
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    assert_eq!(breakdown.final_chips, 105);
}

#[test]
fn glass_doubles_once_per_card_in_order() {
    let mut ctx = base_context(HandKind::Pair);
    let mut first = Card::standard(Suit::Hearts, Rank::Ten);
    first.enhancement = Some(Enhancement::Glass);
    let mut second = Card::standard(Suit::Clubs, Rank::Ten);
    second.enhancement = Some(Enhancement::Glass);
    ctx.played = vec![first, second];
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    assert_eq!(breakdown.final_mult, 8.0);

    let doublings: Vec<f64> = breakdown
        .steps
        .iter()
        .filter_map(|step| match step.effect {
            RuleEffect::MultiplyMult(_) => Some(step.after.mult / step.before.mult),
            _ => None,
        })
        .collect();
    assert_eq!(doublings, vec![2.0, 2.0]);
}

#[test]
fn enhancement_and_edition_both_apply() {
    let mut ctx = base_context(HandKind::HighCard);
    let mut card = Card::standard(Suit::Hearts, Rank::Ace);
    card.enhancement = Some(Enhancement::Bonus);
    card.edition = Some(Edition::Holographic);
    ctx.played = vec![card];
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    // 5 base + 11 rank + 30 bonus chips; 1 base + 10 holographic mult.
    assert_eq!(breakdown.final_chips, 46);
    assert_eq!(breakdown.final_mult, 11.0);
}

#[test]
fn steel_in_hand_ignores_played_cards() {
    let mut steel_king = Card::standard(Suit::Spades, Rank::King);
    steel_king.enhancement = Some(Enhancement::Steel);
    steel_king.scoring = false;

    let mut bare = base_context(HandKind::HighCard);
    bare.held = vec![steel_king];
    let without_played = score_hand(&bare, &ScoreTables::default());
    assert_eq!(without_played.final_mult, 1.5);

    let mut busy = base_context(HandKind::HighCard);
    busy.held = vec![steel_king];
    busy.played = make_cards(&[(Suit::Hearts, Rank::Two), (Suit::Clubs, Rank::Three)]);
    busy.played[0].scoring = false;
    let with_played = score_hand(&busy, &ScoreTables::default());
    assert_eq!(with_played.final_mult, 1.5);
}

#[test]
fn blackboard_needs_every_held_card_dark() {
    let blackboard = make_joker(
        "blackboard",
        vec![JokerEffect {
            kind: EffectKind::MultiplicativeMult,
            trigger: EffectTrigger::HeldInHand,
            value: 3.0,
            condition: Some(EffectCondition {
                suits: vec![Suit::Spades, Suit::Clubs],
                ..EffectCondition::default()
            }),
        }],
    );

    let mut all_dark = base_context(HandKind::HighCard);
    all_dark.held = make_cards(&[(Suit::Spades, Rank::Two), (Suit::Clubs, Rank::Nine)]);
    all_dark.jokers = vec![blackboard.clone()];
    assert_eq!(
        score_hand(&all_dark, &ScoreTables::default()).joker_x_mult,
        3.0
    );

    let mut mixed = base_context(HandKind::HighCard);
    mixed.held = make_cards(&[(Suit::Spades, Rank::Two), (Suit::Hearts, Rank::Nine)]);
    mixed.jokers = vec![blackboard.clone()];
    assert_eq!(score_hand(&mixed, &ScoreTables::default()).joker_x_mult, 1.0);

    // An empty hand never satisfies the all-match condition.
    let mut empty = base_context(HandKind::HighCard);
    empty.jokers = vec![blackboard];
    assert_eq!(score_hand(&empty, &ScoreTables::default()).joker_x_mult, 1.0);
}

#[test]
fn baron_compounds_per_held_king() {
    let baron = make_joker(
        "baron",
        vec![JokerEffect {
            kind: EffectKind::MultiplicativeMult,
            trigger: EffectTrigger::HeldInHand,
            value: 1.5,
            condition: Some(EffectCondition {
                ranks: vec![Rank::King],
                per_card: true,
                ..EffectCondition::default()
            }),
        }],
    );
    let mut ctx = base_context(HandKind::HighCard);
    ctx.held = make_cards(&[
        (Suit::Hearts, Rank::King),
        (Suit::Spades, Rank::King),
        (Suit::Clubs, Rank::Two),
    ]);
    ctx.jokers = vec![baron];
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    assert_eq!(breakdown.joker_x_mult, 2.25);
}

#[test]
fn per_suit_multiplicative_compounds() {
    let idol = make_joker(
        "heart_idol",
        vec![JokerEffect {
            kind: EffectKind::MultiplicativeMult,
            trigger: EffectTrigger::PerSuit,
            value: 1.5,
            condition: Some(EffectCondition {
                suits: vec![Suit::Hearts],
                per_card: true,
                ..EffectCondition::default()
            }),
        }],
    );
    let mut ctx = base_context(HandKind::ThreeOfAKind);
    ctx.played = make_cards(&[
        (Suit::Hearts, Rank::Seven),
        (Suit::Hearts, Rank::Seven),
        (Suit::Hearts, Rank::Seven),
    ]);
    ctx.jokers = vec![idol];
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    assert_eq!(breakdown.joker_x_mult, 3.375);
}

#[test]
fn per_rank_counts_matching_scoring_cards() {
    let fibonacci = make_joker(
        "fibonacci",
        vec![JokerEffect {
            kind: EffectKind::AdditiveMult,
            trigger: EffectTrigger::PerRank,
            value: 8.0,
            condition: Some(EffectCondition {
                ranks: vec![Rank::Ace, Rank::Two, Rank::Three, Rank::Five, Rank::Eight],
                per_card: true,
                ..EffectCondition::default()
            }),
        }],
    );
    let mut ctx = base_context(HandKind::HighCard);
    ctx.played = make_cards(&[
        (Suit::Hearts, Rank::Ace),
        (Suit::Clubs, Rank::Two),
        (Suit::Spades, Rank::Four),
    ]);
    ctx.jokers = vec![fibonacci];
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    assert_eq!(breakdown.joker_mult, 16.0);
}

#[test]
fn per_rank_without_per_card_flag_is_inert() {
    let photograph = make_joker(
        "photograph",
        vec![JokerEffect {
            kind: EffectKind::MultiplicativeMult,
            trigger: EffectTrigger::PerRank,
            value: 2.0,
            condition: Some(EffectCondition {
                ranks: vec![Rank::Jack, Rank::Queen, Rank::King],
                ..EffectCondition::default()
            }),
        }],
    );
    let mut ctx = base_context(HandKind::HighCard);
    ctx.played = make_cards(&[(Suit::Hearts, Rank::King)]);
    ctx.jokers = vec![photograph];
    assert_eq!(score_hand(&ctx, &ScoreTables::default()).joker_x_mult, 1.0);
}

#[test]
fn hand_played_matches_hand_type_sets() {
    let jolly = make_joker(
        "jolly_joker",
        vec![JokerEffect {
            kind: EffectKind::AdditiveMult,
            trigger: EffectTrigger::HandPlayed,
            value: 8.0,
            condition: Some(EffectCondition {
                hand_types: vec![
                    HandKind::Pair,
                    HandKind::TwoPair,
                    HandKind::FullHouse,
                    HandKind::ThreeOfAKind,
                    HandKind::FourOfAKind,
                    HandKind::FiveOfAKind,
                ],
                ..EffectCondition::default()
            }),
        }],
    );

    let mut pair = base_context(HandKind::Pair);
    pair.jokers = vec![jolly.clone()];
    assert_eq!(score_hand(&pair, &ScoreTables::default()).joker_mult, 8.0);

    let mut high = base_context(HandKind::HighCard);
    high.jokers = vec![jolly];
    assert_eq!(score_hand(&high, &ScoreTables::default()).joker_mult, 0.0);
}

#[test]
fn on_scored_caps_scoring_card_count() {
    let half = make_joker(
        "half_joker",
        vec![JokerEffect {
            kind: EffectKind::AdditiveMult,
            trigger: EffectTrigger::OnScored,
            value: 20.0,
            condition: Some(EffectCondition {
                max_cards: Some(3),
                ..EffectCondition::default()
            }),
        }],
    );

    let mut small = base_context(HandKind::ThreeOfAKind);
    small.played = make_cards(&[
        (Suit::Hearts, Rank::Two),
        (Suit::Clubs, Rank::Two),
        (Suit::Spades, Rank::Two),
    ]);
    small.jokers = vec![half.clone()];
    assert_eq!(score_hand(&small, &ScoreTables::default()).joker_mult, 20.0);

    let mut wide = base_context(HandKind::TwoPair);
    wide.played = make_cards(&[
        (Suit::Hearts, Rank::Two),
        (Suit::Clubs, Rank::Two),
        (Suit::Spades, Rank::Nine),
        (Suit::Hearts, Rank::Nine),
    ]);
    wide.jokers = vec![half];
    assert_eq!(score_hand(&wide, &ScoreTables::default()).joker_mult, 0.0);
}

#[test]
fn economy_scales_with_money() {
    let bull = make_joker(
        "bull",
        vec![simple_effect(
            EffectKind::AdditiveChips,
            EffectTrigger::Economy,
            2.0,
        )],
    );
    let mut ctx = base_context(HandKind::HighCard);
    ctx.money = 7;
    ctx.jokers = vec![bull];
    assert_eq!(score_hand(&ctx, &ScoreTables::default()).joker_chips, 14);
}

#[test]
fn per_joker_scaling_counts_active_jokers() {
    let mut abstract_joker = make_joker(
        "abstract_joker",
        vec![simple_effect(
            EffectKind::AdditiveMult,
            EffectTrigger::Always,
            3.0,
        )],
    );
    abstract_joker.special = Some(SpecialRule::PerJokerCount);

    let filler = make_joker("blueprint", Vec::new());
    let mut inactive = filler.clone();
    inactive.active = false;

    let mut ctx = base_context(HandKind::HighCard);
    ctx.jokers = vec![abstract_joker.clone(), filler.clone(), filler.clone()];
    assert_eq!(score_hand(&ctx, &ScoreTables::default()).joker_mult, 9.0);

    // Inactive jokers drop out of both the evaluation and the count.
    let mut fewer = base_context(HandKind::HighCard);
    fewer.jokers = vec![abstract_joker, filler, inactive];
    assert_eq!(score_hand(&fewer, &ScoreTables::default()).joker_mult, 6.0);
}

#[test]
fn counter_substitutes_for_chips_and_x_mult() {
    let mut square = make_joker(
        "square_joker",
        vec![simple_effect(
            EffectKind::AdditiveChips,
            EffectTrigger::Always,
            16.0,
        )],
    );
    square.counter = Some(24.0);

    let mut hologram = make_joker(
        "hologram",
        vec![simple_effect(
            EffectKind::MultiplicativeMult,
            EffectTrigger::Always,
            1.0,
        )],
    );
    hologram.counter = Some(1.5);

    let mut ctx = base_context(HandKind::HighCard);
    ctx.jokers = vec![square, hologram];
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    assert_eq!(breakdown.joker_chips, 24);
    assert_eq!(breakdown.joker_x_mult, 1.5);
}

#[test]
fn zero_effect_joker_still_scores_its_edition() {
    let mut blueprint = make_joker("blueprint", Vec::new());
    blueprint.edition = Some(Edition::Foil);
    let mut ctx = base_context(HandKind::HighCard);
    ctx.jokers = vec![blueprint];
    let breakdown = score_hand(&ctx, &ScoreTables::default());
    assert_eq!(breakdown.joker_chips, 50);
    assert_eq!(breakdown.steps.len(), 2);
}

#[test]
fn joker_order_is_left_to_right() {
    let plus_mult = make_joker(
        "joker",
        vec![simple_effect(
            EffectKind::AdditiveMult,
            EffectTrigger::Always,
            4.0,
        )],
    );
    let times_mult = make_joker(
        "cavendish",
        vec![simple_effect(
            EffectKind::MultiplicativeMult,
            EffectTrigger::Always,
            3.0,
        )],
    );

    let mut add_first = base_context(HandKind::HighCard);
    add_first.jokers = vec![plus_mult.clone(), times_mult.clone()];
    let left = score_hand(&add_first, &ScoreTables::default());
    // (1 + 4) * 3
    assert_eq!(left.final_mult, 15.0);

    let mut times_first = base_context(HandKind::HighCard);
    times_first.jokers = vec![times_mult, plus_mult];
    let right = score_hand(&times_first, &ScoreTables::default());
    // 1 * 3 + 4
    assert_eq!(right.final_mult, 7.0);
}

#[test]
fn display_rounding_never_reaches_the_total() {
    let mut drift = make_joker(
        "drift",
        vec![simple_effect(
            EffectKind::MultiplicativeMult,
            EffectTrigger::Always,
            1.0,
        )],
    );
    drift.counter = Some(1.0075);

    let mut ctx = base_context(HandKind::HighCard);
    ctx.played = vec![
        Card {
            enhancement: Some(Enhancement::Bonus),
            ..Card::standard(Suit::Spades, Rank::Ace)
        };
        5
    ];
    ctx.jokers = vec![drift];
    let breakdown = score_hand(&ctx, &ScoreTables::default());

    let unrounded = breakdown.steps.last().expect("steps").after.mult;
    assert_eq!(
        breakdown.total_score,
        (breakdown.final_chips as f64 * unrounded).floor() as i64
    );
    assert_eq!(breakdown.final_mult, 1.01);
    // 210 chips at x1.0075 floors to 211; the rounded display mult would claim 212.
    assert_eq!(breakdown.total_score, 211);
}

#[test]
fn identical_inputs_give_identical_breakdowns() {
    let mut ctx = base_context(HandKind::Flush);
    ctx.played = make_cards(&[
        (Suit::Hearts, Rank::Two),
        (Suit::Hearts, Rank::Five),
        (Suit::Hearts, Rank::Nine),
        (Suit::Hearts, Rank::Jack),
        (Suit::Hearts, Rank::King),
    ]);
    ctx.played[1].enhancement = Some(Enhancement::Glass);
    ctx.held = make_cards(&[(Suit::Spades, Rank::King)]);
    ctx.held[0].enhancement = Some(Enhancement::Steel);
    ctx.jokers = vec![make_joker(
        "joker",
        vec![simple_effect(
            EffectKind::AdditiveMult,
            EffectTrigger::Always,
            4.0,
        )],
    )];

    let tables = ScoreTables::default();
    let first = score_hand(&ctx, &tables);
    let second = score_hand(&ctx, &tables);
    assert_eq!(first, second);
}

#[test]
fn hand_level_scales_base_values() {
    let tables = ScoreTables::default();
    let mut ctx = base_context(HandKind::Pair);
    ctx.level = 3;
    let breakdown = score_hand(&ctx, &tables);
    assert_eq!(breakdown.base.chips, 40);
    assert_eq!(breakdown.base.mult, 4.0);
    assert_eq!(breakdown.total_score, 160);
}

#[test]
fn hand_level_zero_is_computed_not_clamped() {
    let tables = ScoreTables::default();
    assert_eq!(
        tables.hand_base_for_level(HandKind::Pair, 0),
        (-5, 1.0)
    );
}
