//! Decoding against intended sequences
//!
//! Tests:
//! - The model of any consistent sequence satisfies the compiled CNF
//! - Decoding that model reproduces the sequence, placeholders included

use crate::common::{color_repeats, extend_assignment, model_for, stroop};
use proptest::prelude::*;
use seqsat_design::{Block, CompileConfig, compile, decode};

const COLORS: [&str; 2] = ["red", "blue"];

proptest! {
    #[test]
    fn decode_inverts_a_consistent_model(
        picks in prop::collection::vec((0usize..2, 0usize..2), 4..9),
    ) {
        let colors: Vec<&str> = picks.iter().map(|&(c, _)| COLORS[c]).collect();
        let texts: Vec<&str> = picks.iter().map(|&(_, t)| COLORS[t]).collect();
        let congruent: Vec<&str> = picks
            .iter()
            .map(|&(c, t)| if c == t { "con" } else { "inc" })
            .collect();
        let repeats: Vec<&str> = (0..picks.len())
            .map(|t| match t {
                0 => "",
                _ if colors[t] == colors[t - 1] => "yes",
                _ => "no",
            })
            .collect();

        let mut design = stroop();
        design.push(color_repeats());
        let block = Block::new(design, ["color", "text"], picks.len(), vec![]).unwrap();
        let model = model_for(
            &block,
            &[
                ("color", colors.clone()),
                ("text", texts.clone()),
                ("congruent?", congruent.clone()),
                ("color repeats?", repeats.clone()),
            ],
        );

        let config = CompileConfig { full_crossing: false, ..CompileConfig::default() };
        let compiled = compile(&block, &config).unwrap();
        prop_assert!(extend_assignment(compiled.cnf(), compiled.num_vars(), &model).is_some());

        let sequence = decode(&block, &model).unwrap();
        prop_assert_eq!(sequence.levels("color").unwrap(), colors);
        prop_assert_eq!(sequence.levels("text").unwrap(), texts);
        prop_assert_eq!(sequence.levels("congruent?").unwrap(), congruent);
        prop_assert_eq!(sequence.levels("color repeats?").unwrap(), repeats);
    }
}
