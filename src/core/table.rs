//! Table-driven UTF-8 automaton.
//! Both tables are computed at compile time from the well-formed byte sequence
//! grammar (Unicode Standard, Table 3-7) rather than written out by hand.

pub const UTF8_ACCEPT: u8 = 0;
pub const UTF8_REJECT: u8 = 1;

/// One continuation byte left, any of 80..BF.
const NEED1: u8 = 2;
/// Two continuation bytes left, any of 80..BF.
const NEED2: u8 = 3;
/// After E0: A0..BF, anything lower is overlong.
const NEED2_E0: u8 = 4;
/// After ED: 80..9F, anything higher is a surrogate.
const NEED2_ED: u8 = 5;
/// After F0: 90..BF, anything lower is overlong.
const NEED3_F0: u8 = 6;
/// Three continuation bytes left, any of 80..BF.
const NEED3: u8 = 7;
/// After F4: 80..8F, anything higher is past U+10FFFF.
const NEED3_F4: u8 = 8;

pub const STATE_COUNT: usize = 9;

/// Row stride of the transition table. Classes must fit in one row.
const STRIDE: usize = 16;

/// (first lead byte, last lead byte, state entered)
const LEADS: [(u8, u8, u8); 9] = [
    (0x00, 0x7f, UTF8_ACCEPT),
    (0xc2, 0xdf, NEED1),
    (0xe0, 0xe0, NEED2_E0),
    (0xe1, 0xec, NEED2),
    (0xed, 0xed, NEED2_ED),
    (0xee, 0xef, NEED2),
    (0xf0, 0xf0, NEED3_F0),
    (0xf1, 0xf3, NEED3),
    (0xf4, 0xf4, NEED3_F4),
];

/// (state, lowest allowed byte, highest allowed byte, state entered)
const CONTINUATIONS: [(u8, u8, u8, u8); 7] = [
    (NEED1, 0x80, 0xbf, UTF8_ACCEPT),
    (NEED2, 0x80, 0xbf, NEED1),
    (NEED2_E0, 0xa0, 0xbf, NEED1),
    (NEED2_ED, 0x80, 0x9f, NEED1),
    (NEED3_F0, 0x90, 0xbf, NEED2),
    (NEED3, 0x80, 0xbf, NEED2),
    (NEED3_F4, 0x80, 0x8f, NEED2),
];

/// Transition straight from the grammar. Only used to build the tables.
const fn grammar_step(state: u8, byte: u8) -> u8 {
    if state == UTF8_ACCEPT {
        let mut i = 0;
        while i < LEADS.len() {
            let (lo, hi, next) = LEADS[i];
            if byte >= lo && byte <= hi {
                return next;
            }
            i += 1;
        }
        return UTF8_REJECT;
    }
    let mut i = 0;
    while i < CONTINUATIONS.len() {
        let (from, lo, hi, next) = CONTINUATIONS[i];
        if from == state {
            return if byte >= lo && byte <= hi { next } else { UTF8_REJECT };
        }
        i += 1;
    }
    UTF8_REJECT
}

/// Next state from every state for `byte`. Bytes with equal signatures share a class.
const fn signature(byte: u8) -> [u8; STATE_COUNT] {
    let mut sig = [UTF8_REJECT; STATE_COUNT];
    let mut s = 0;
    while s < STATE_COUNT {
        sig[s] = grammar_step(s as u8, byte);
        s += 1;
    }
    sig
}

const fn same_signature(a: &[u8; STATE_COUNT], b: &[u8; STATE_COUNT]) -> bool {
    let mut s = 0;
    while s < STATE_COUNT {
        if a[s] != b[s] {
            return false;
        }
        s += 1;
    }
    true
}

/// The two flat lookup tables plus the number of byte classes in use.
pub struct Dfa {
    classes: [u8; 256],
    transitions: [u8; STATE_COUNT * STRIDE],
    class_count: usize,
}

impl Dfa {
    const fn build() -> Self {
        let mut classes = [0u8; 256];
        // Signature of the first byte seen in each class, in order of appearance.
        let mut reps = [[UTF8_REJECT; STATE_COUNT]; STRIDE];
        let mut class_count = 0;

        let mut b = 0;
        while b < 256 {
            let sig = signature(b as u8);
            let mut c = 0;
            while c < class_count && !same_signature(&reps[c], &sig) {
                c += 1;
            }
            if c == class_count {
                assert!(class_count < STRIDE, "byte classes overflow the table stride");
                reps[c] = sig;
                class_count += 1;
            }
            classes[b] = c as u8;
            b += 1;
        }

        let mut transitions = [UTF8_REJECT; STATE_COUNT * STRIDE];
        let mut s = 0;
        while s < STATE_COUNT {
            let mut c = 0;
            while c < class_count {
                transitions[s * STRIDE + c] = reps[c][s];
                c += 1;
            }
            s += 1;
        }

        Self { classes, transitions, class_count }
    }

    /// Advance `state` by one input byte.
    #[inline(always)]
    pub fn step(&self, state: u8, byte: u8) -> u8 {
        let class = self.classes[byte as usize] as usize;
        self.transitions[(state as usize) * STRIDE + class]
    }

    pub fn class_of(&self, byte: u8) -> u8 {
        self.classes[byte as usize]
    }

    pub fn class_count(&self) -> usize {
        self.class_count
    }
}

/// Process-wide, read-only automaton shared by every validator.
pub static DFA: Dfa = Dfa::build();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_count() {
        // ASCII, three continuation ranges, never-valid, C2..DF, E0, E1..EC/EE..EF,
        // ED, F0, F1..F3, F4
        assert_eq!(DFA.class_count(), 12);
    }

    #[test]
    fn test_class_boundaries() {
        assert_eq!(DFA.class_of(0x00), DFA.class_of(0x7f));
        assert_ne!(DFA.class_of(0x8f), DFA.class_of(0x90));
        assert_ne!(DFA.class_of(0x9f), DFA.class_of(0xa0));
        assert_eq!(DFA.class_of(0xa0), DFA.class_of(0xbf));
        assert_eq!(DFA.class_of(0xc0), DFA.class_of(0xc1));
        assert_eq!(DFA.class_of(0xc0), DFA.class_of(0xf5));
        assert_eq!(DFA.class_of(0xc0), DFA.class_of(0xff));
        assert_ne!(DFA.class_of(0xc1), DFA.class_of(0xc2));
        assert_eq!(DFA.class_of(0xe1), DFA.class_of(0xee));
        assert_ne!(DFA.class_of(0xec), DFA.class_of(0xed));
    }

    #[test]
    fn test_reject_is_absorbing() {
        for byte in 0..=255u8 {
            assert_eq!(DFA.step(UTF8_REJECT, byte), UTF8_REJECT, "byte {byte:#04x}");
        }
    }

    #[test]
    fn test_table_matches_grammar() {
        for state in 0..STATE_COUNT as u8 {
            for byte in 0..=255u8 {
                assert_eq!(DFA.step(state, byte), grammar_step(state, byte),
                    "state {state}, byte {byte:#04x}");
            }
        }
    }

    #[test]
    fn test_unused_classes_reject() {
        for state in 0..STATE_COUNT {
            for class in DFA.class_count()..STRIDE {
                assert_eq!(DFA.transitions[state * STRIDE + class], UTF8_REJECT);
            }
        }
    }

    #[test]
    fn test_lead_bytes() {
        assert_eq!(DFA.step(UTF8_ACCEPT, b'A'), UTF8_ACCEPT);
        assert_eq!(DFA.step(UTF8_ACCEPT, 0x80), UTF8_REJECT); // stray continuation
        assert_eq!(DFA.step(UTF8_ACCEPT, 0xc0), UTF8_REJECT); // always overlong
        assert_eq!(DFA.step(UTF8_ACCEPT, 0xc2), NEED1);
        assert_eq!(DFA.step(UTF8_ACCEPT, 0xf5), UTF8_REJECT); // past U+10FFFF
    }

    #[test]
    fn test_restricted_second_bytes() {
        assert_eq!(DFA.step(NEED2_E0, 0x9f), UTF8_REJECT);
        assert_eq!(DFA.step(NEED2_E0, 0xa0), NEED1);
        assert_eq!(DFA.step(NEED2_ED, 0x9f), NEED1);
        assert_eq!(DFA.step(NEED2_ED, 0xa0), UTF8_REJECT);
        assert_eq!(DFA.step(NEED3_F0, 0x8f), UTF8_REJECT);
        assert_eq!(DFA.step(NEED3_F0, 0x90), NEED2);
        assert_eq!(DFA.step(NEED3_F4, 0x8f), NEED2);
        assert_eq!(DFA.step(NEED3_F4, 0x90), UTF8_REJECT);
    }
}
