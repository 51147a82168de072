//! Annotation levels and label tables.
//!
//! Annotation producers and the pattern compiler share these tables: a tag
//! such as `"NN"` or `"B-ORG"` is stored on an [`AnnotationToken`] as a
//! one-byte code, and `<...>` pattern tokens are resolved against the same
//! codes. The tables are built once on first use and never mutated.
//!
//! [`AnnotationToken`]: super::AnnotationToken

use std::fmt;
use std::sync::LazyLock;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Named annotation levels with their fixed integer identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum AnnotationLevel {
    /// Part of speech
    Pos = 0,
    /// Chunking
    Chunk = 1,
    /// Named entity recognition
    Ner = 2,
    /// Semantic role labeling
    SemanticRole = 3,
    /// Syntactic parsing
    Parse = 4,
    /// Dialogue units
    DialogueUnit = 5,
}

impl AnnotationLevel {
    /// All levels, ordered by identifier.
    pub const ALL: [AnnotationLevel; 6] = [
        AnnotationLevel::Pos,
        AnnotationLevel::Chunk,
        AnnotationLevel::Ner,
        AnnotationLevel::SemanticRole,
        AnnotationLevel::Parse,
        AnnotationLevel::DialogueUnit,
    ];

    /// Integer identifier of this level.
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Look a level up by its integer identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Short name of the level (`POS`, `CHK`, `NER`, `SRL`, `PSG`, `DUN`).
    pub fn name(self) -> &'static str {
        match self {
            AnnotationLevel::Pos => "POS",
            AnnotationLevel::Chunk => "CHK",
            AnnotationLevel::Ner => "NER",
            AnnotationLevel::SemanticRole => "SRL",
            AnnotationLevel::Parse => "PSG",
            AnnotationLevel::DialogueUnit => "DUN",
        }
    }

    /// Look a level up by its short name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|level| level.name() == name)
    }
}

impl fmt::Display for AnnotationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bidirectional tag <-> code table for one annotation level.
#[derive(Debug, Default)]
struct LabelTable {
    codes: AHashMap<&'static str, i8>,
    names: AHashMap<i8, &'static str>,
}

impl LabelTable {
    // A tag registered twice keeps its last code; both codes keep a name.
    fn add(&mut self, label: &'static str, code: i8) {
        self.codes.insert(label, code);
        self.names.insert(code, label);
    }
}

/// Generic POS classes (`NN*`, `VB*`, ...) and the reverse code -> class map.
#[derive(Debug, Default)]
struct GenericPosTable {
    classes: AHashMap<&'static str, AHashSet<i8>>,
    class_of: AHashMap<i8, &'static str>,
}

impl GenericPosTable {
    fn add(&mut self, label: &'static str, codes: &[i8]) {
        let mut set = AHashSet::with_capacity(codes.len());
        for &code in codes {
            set.insert(code);
            self.class_of.insert(code, label);
        }
        self.classes.insert(label, set);
    }
}

fn build_pos_table() -> LabelTable {
    let mut table = LabelTable::default();

    // English Penn tagset
    for (label, code) in [
        ("CC", 1),
        ("CD", 2),
        ("DT", 3),
        ("EX", 4),
        ("FW", 5),
        ("IN", 6),
        ("JJ", 7),
        ("JJR", 8),
        ("JJS", 9),
        ("LS", 10),
        ("MD", 11),
        ("NN", 12),
        ("NNS", 13),
        ("NNP", 14),
        ("NNPS", 15),
        ("PDT", 16),
        ("POS", 17),
        ("PRP", 18),
        ("PP$", 19),
        ("PP", 19),
        ("RB", 20),
        ("RBR", 21),
        ("RBS", 22),
        ("RP", 23),
        ("SYM", 24),
        ("TO", 25),
        ("UH", 26),
        ("VB", 27),
        ("VBD", 28),
        ("VBG", 29),
        ("VBN", 30),
        ("VBP", 31),
        ("VBZ", 32),
        ("WDT", 33),
        ("WP", 34),
        ("WP$", 35),
        ("WRB", 36),
        ("#", 37),
        ("$", 38),
        (".", 39),
        (",", 40),
        (":", 41),
        ("(", 42),
        (")", 43),
        ("\"", 44),
        ("'", 45),
    ] {
        table.add(label, code);
    }

    // French TreeTagger tagset
    for (label, code) in [
        ("ABR", 50),
        ("ADJ", 51),
        ("ADV", 52),
        ("DET:ART", 53),
        ("DET:POS", 54),
        ("INT", 55),
        ("KON", 56),
        ("NAM", 57),
        ("NOM", 58),
        ("NUM", 59),
        ("PRO", 60),
        ("PRO:DEM", 61),
        ("PRO:IND", 62),
        ("PRO:PER", 63),
        ("PRO:POS", 64),
        ("PRO:REL", 65),
        ("PRP", 66),
        ("PRP:det", 67),
        ("PUN", 68),
        ("SENT", 69),
        ("SYM", 70),
        ("VER:cond", 71),
        ("VER:futu", 72),
        ("VER:impe", 73),
        ("VER:impf", 74),
        ("VER:infi", 75),
        ("VER:pper", 76),
        ("VER:ppre", 77),
        ("VER:pres", 78),
        ("VER:simp", 79),
        ("VER:subi", 80),
        ("VER:subp", 81),
    ] {
        table.add(label, code);
    }

    table
}

fn build_generic_pos_table() -> GenericPosTable {
    let mut table = GenericPosTable::default();
    table.add("NN*", &[12, 13, 14, 15, 57, 58]);
    table.add("JJ*", &[7, 8, 9, 51]);
    table.add("RB*", &[20, 21, 22, 52]);
    table.add(
        "VB*",
        &[
            27, 28, 29, 30, 31, 32, 71, 72, 73, 74, 75, 76, 77, 78, 79, 80, 81,
        ],
    );
    table.add("#*", &[37, 38, 39, 40, 41, 42, 43, 44, 45, 68, 69, 70]);
    table
}

/// BIOES tag groups numbered consecutively from code 2, with `O` as -1.
fn build_bioes_table(tags: &'static [[&'static str; 4]]) -> LabelTable {
    let mut table = LabelTable::default();
    table.add("O", -1);
    table.add("0", -1);

    let mut code = 2i8;
    for group in tags {
        for &label in group {
            table.add(label, code);
            code += 1;
        }
    }
    table
}

const CHUNK_TAGS: &[[&str; 4]] = &[
    ["B-NP", "I-NP", "E-NP", "S-NP"],
    ["B-VP", "I-VP", "E-VP", "S-VP"],
    ["B-PP", "I-PP", "E-PP", "S-PP"],
    ["B-SBAR", "I-SBAR", "E-SBAR", "S-SBAR"],
    ["B-ADJP", "I-ADJP", "E-ADJP", "S-ADJP"],
    ["B-ADVP", "I-ADVP", "E-ADVP", "S-ADVP"],
];

const NER_TAGS: &[[&str; 4]] = &[
    ["B-ORG", "I-ORG", "E-ORG", "S-ORG"],
    ["B-LOC", "I-LOC", "E-LOC", "S-LOC"],
    ["B-PER", "I-PER", "E-PER", "S-PER"],
    ["B-MISC", "I-MISC", "E-MISC", "S-MISC"],
];

static POS_LABELS: LazyLock<LabelTable> = LazyLock::new(build_pos_table);
static GENERIC_POS: LazyLock<GenericPosTable> = LazyLock::new(build_generic_pos_table);
static CHUNK_LABELS: LazyLock<LabelTable> = LazyLock::new(|| build_bioes_table(CHUNK_TAGS));
static NER_LABELS: LazyLock<LabelTable> = LazyLock::new(|| build_bioes_table(NER_TAGS));

fn table(level: AnnotationLevel) -> Option<&'static LabelTable> {
    match level {
        AnnotationLevel::Pos => Some(&*POS_LABELS),
        AnnotationLevel::Chunk => Some(&*CHUNK_LABELS),
        AnnotationLevel::Ner => Some(&*NER_LABELS),
        _ => None,
    }
}

/// Code of a tag at the given level.
///
/// Returns `None` for unknown tags and for levels without a label table.
pub fn label_code(level: AnnotationLevel, label: &str) -> Option<i8> {
    table(level)?.codes.get(label).copied()
}

/// Tag name of a code at the given level.
pub fn label_name(level: AnnotationLevel, code: i8) -> Option<&'static str> {
    table(level)?.names.get(&code).copied()
}

/// Resolve a POS class name to the set of codes it covers.
///
/// Generic classes ending in `*` expand to all their members (`NN*` covers
/// every noun tag). A `*`-suffixed name that is not a generic class resolves
/// to the concrete tag without the `*`. Unknown names resolve to an empty set.
pub fn pos_class(name: &str) -> AHashSet<i8> {
    if let Some(concrete) = name.strip_suffix('*') {
        if let Some(codes) = GENERIC_POS.classes.get(name) {
            return codes.clone();
        }
        return label_code(AnnotationLevel::Pos, concrete).into_iter().collect();
    }
    label_code(AnnotationLevel::Pos, name).into_iter().collect()
}

/// Name of the generic class (`NN*`, `RB*`, ...) a POS code belongs to.
pub fn generic_pos_label(code: i8) -> Option<&'static str> {
    GENERIC_POS.class_of.get(&code).copied()
}
