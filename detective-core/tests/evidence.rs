//! Evidence tests: clue notebook, suspect index and accusation together.
//!
//! Run with: `cargo test -p detective-core --test evidence`

use detective_core::{evaluate, judge, ClueSet, Judgment, SuspectIndex, Verdict};
use pretty_assertions::assert_eq;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

const CATALOG: [&str; 7] = [
    "pegadas_no_chao",
    "livro_aberto_sobre_enigmas",
    "faca_limpa_na_mesa",
    "mapa_rasgado_com_x",
    "vaso_quebrado",
    "cofre_trancado_com_simbolos",
    "retrato_antigo_quebrado",
];

fn associate_all(pairs: &[(&str, &str)]) -> SuspectIndex {
    let mut index = SuspectIndex::new();
    for (clue, suspect) in pairs {
        index.associate(clue, suspect);
    }
    index
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn scenario_two_clues_against_dr_costa() {
    let mut clues = ClueSet::new();
    clues.insert("mapa_rasgado_com_x");
    clues.insert("cofre_trancado_com_simbolos");
    let index = associate_all(&[
        ("mapa_rasgado_com_x", "Dr. Costa"),
        ("cofre_trancado_com_simbolos", "Dr. Costa"),
    ]);

    assert_eq!(evaluate(&clues, &index, "Dr. Costa"), 2);
    assert_eq!(
        judge(&clues, &index, "Dr. Costa"),
        Judgment::Decided {
            accused: "Dr. Costa".to_string(),
            count: 2,
            verdict: Verdict::Supported,
        }
    );
}

#[test]
fn scenario_single_clue_against_sr_silva() {
    let mut clues = ClueSet::new();
    clues.insert("pegadas_no_chao");
    let index = associate_all(&[("pegadas_no_chao", "Sr. Silva")]);

    let judgment = judge(&clues, &index, "Sr. Silva");
    assert_eq!(judgment.count(), Some(1));
    assert_eq!(judgment.verdict(), Some(Verdict::Unsupported));
}

#[test]
fn scenario_empty_notebook() {
    let clues = ClueSet::new();
    let index = SuspectIndex::standard();

    for accused in ["Dr. Costa", "Sr. Silva", "anyone"] {
        let judgment = judge(&clues, &index, accused);
        assert_eq!(judgment, Judgment::NoEvidence);
        assert_eq!(judgment.count(), Some(0));
        assert_eq!(judgment.verdict(), Some(Verdict::Unsupported));
    }
}

#[test]
fn scenario_blank_accusation_differs_from_zero_count() {
    let clues: ClueSet = ["vaso_quebrado"].into_iter().collect();
    let index = SuspectIndex::standard();

    let declined = judge(&clues, &index, "");
    assert_eq!(declined, Judgment::NoAccusation);
    assert_eq!(declined.count(), None);

    let zero = judge(&clues, &index, "Dr. Costa");
    assert_eq!(zero.count(), Some(0));
    assert_ne!(declined, zero);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn notebook_is_sorted_and_unique_for_any_insertion_order() {
    let mut rng = StdRng::seed_from_u64(0xC1_0E);
    let mut input: Vec<&str> = CATALOG.iter().chain(CATALOG.iter()).copied().collect();
    input.push("");

    let mut expected: Vec<&str> = CATALOG.to_vec();
    expected.sort();

    for _ in 0..50 {
        input.shuffle(&mut rng);
        let clues: ClueSet = input.iter().collect();
        let listed = clues.in_order();

        assert!(listed.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(listed, expected);
        assert_eq!(clues.len(), CATALOG.len());
    }
}

#[test]
fn repeated_and_empty_inserts_do_not_grow_notebook() {
    let mut clues = ClueSet::new();
    clues.insert("vaso_quebrado");
    let before = clues.in_order().len();

    clues.insert("vaso_quebrado");
    clues.insert("");
    assert_eq!(clues.in_order().len(), before);
}

#[test]
fn last_association_wins() {
    let mut index = SuspectIndex::new();
    index.associate("faca_limpa_na_mesa", "Sr. Silva");
    index.associate("faca_limpa_na_mesa", "Sra. Almeida");

    assert_eq!(index.lookup("faca_limpa_na_mesa"), Some("Sra. Almeida"));
    assert_eq!(index.entries_for("faca_limpa_na_mesa"), 1);
}

#[test]
fn first_clue_insert_wins() {
    // The notebook keeps the first copy; the index keeps the last. Both
    // behaviors hold side by side.
    let mut clues = ClueSet::new();
    assert!(clues.insert("vaso_quebrado"));
    assert!(!clues.insert("vaso_quebrado"));
    assert_eq!(clues.len(), 1);
}

#[test]
fn unknown_clue_is_not_found() {
    let index = SuspectIndex::standard();
    assert_eq!(index.lookup("janela_aberta"), None);
}

#[test]
fn evaluation_ignores_insertion_order() {
    let mut rng = StdRng::seed_from_u64(7);
    let index = SuspectIndex::standard();
    let mut order = CATALOG.to_vec();

    let reference: ClueSet = CATALOG.iter().collect();
    for accused in ["Sr. Silva", "Sra. Almeida", "Dr. Costa", "Sr. Oliveira"] {
        let expected = evaluate(&reference, &index, accused);
        for _ in 0..20 {
            order.shuffle(&mut rng);
            let shuffled: ClueSet = order.iter().collect();
            assert_eq!(evaluate(&shuffled, &index, accused), expected);
        }
    }
}

#[test]
fn accused_name_case_does_not_matter() {
    let clues: ClueSet = CATALOG.iter().collect();
    let index = SuspectIndex::standard();

    assert_eq!(
        evaluate(&clues, &index, "Dr. Costa"),
        evaluate(&clues, &index, "dr. costa")
    );
    assert_eq!(evaluate(&clues, &index, "SRA. ALMEIDA"), 2);
    assert_eq!(evaluate(&clues, &index, "sr. oliveira"), 1);
}
