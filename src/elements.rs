//! Periodic table lookup: element symbol ↔ atomic number.
//!
//! The table is a process-wide constant. The symbol index is built once on
//! first use and exposes no mutation API.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::services::annotation::AnnotationError;

/// Atomic number (Z), 1 through 118.
pub type AtomicNumber = u32;

/// A chemical element from the periodic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub atomic_number: AtomicNumber,
    pub symbol: &'static str,
    pub name: &'static str,
}

macro_rules! elements {
    ($(($z:expr, $sym:expr, $name:expr)),* $(,)?) => {
        [$(Element { atomic_number: $z, symbol: $sym, name: $name }),*]
    };
}

/// Number of elements the table must carry.
pub const ELEMENT_COUNT: usize = 118;

/// Elements 1–118 (H through Og), ordered by atomic number.
static ELEMENTS: [Element; ELEMENT_COUNT] = elements![
    (1, "H", "Hydrogen"),
    (2, "He", "Helium"),
    (3, "Li", "Lithium"),
    (4, "Be", "Beryllium"),
    (5, "B", "Boron"),
    (6, "C", "Carbon"),
    (7, "N", "Nitrogen"),
    (8, "O", "Oxygen"),
    (9, "F", "Fluorine"),
    (10, "Ne", "Neon"),
    (11, "Na", "Sodium"),
    (12, "Mg", "Magnesium"),
    (13, "Al", "Aluminum"),
    (14, "Si", "Silicon"),
    (15, "P", "Phosphorus"),
    (16, "S", "Sulfur"),
    (17, "Cl", "Chlorine"),
    (18, "Ar", "Argon"),
    (19, "K", "Potassium"),
    (20, "Ca", "Calcium"),
    (21, "Sc", "Scandium"),
    (22, "Ti", "Titanium"),
    (23, "V", "Vanadium"),
    (24, "Cr", "Chromium"),
    (25, "Mn", "Manganese"),
    (26, "Fe", "Iron"),
    (27, "Co", "Cobalt"),
    (28, "Ni", "Nickel"),
    (29, "Cu", "Copper"),
    (30, "Zn", "Zinc"),
    (31, "Ga", "Gallium"),
    (32, "Ge", "Germanium"),
    (33, "As", "Arsenic"),
    (34, "Se", "Selenium"),
    (35, "Br", "Bromine"),
    (36, "Kr", "Krypton"),
    (37, "Rb", "Rubidium"),
    (38, "Sr", "Strontium"),
    (39, "Y", "Yttrium"),
    (40, "Zr", "Zirconium"),
    (41, "Nb", "Niobium"),
    (42, "Mo", "Molybdenum"),
    (43, "Tc", "Technetium"),
    (44, "Ru", "Ruthenium"),
    (45, "Rh", "Rhodium"),
    (46, "Pd", "Palladium"),
    (47, "Ag", "Silver"),
    (48, "Cd", "Cadmium"),
    (49, "In", "Indium"),
    (50, "Sn", "Tin"),
    (51, "Sb", "Antimony"),
    (52, "Te", "Tellurium"),
    (53, "I", "Iodine"),
    (54, "Xe", "Xenon"),
    (55, "Cs", "Cesium"),
    (56, "Ba", "Barium"),
    (57, "La", "Lanthanum"),
    (58, "Ce", "Cerium"),
    (59, "Pr", "Praseodymium"),
    (60, "Nd", "Neodymium"),
    (61, "Pm", "Promethium"),
    (62, "Sm", "Samarium"),
    (63, "Eu", "Europium"),
    (64, "Gd", "Gadolinium"),
    (65, "Tb", "Terbium"),
    (66, "Dy", "Dysprosium"),
    (67, "Ho", "Holmium"),
    (68, "Er", "Erbium"),
    (69, "Tm", "Thulium"),
    (70, "Yb", "Ytterbium"),
    (71, "Lu", "Lutetium"),
    (72, "Hf", "Hafnium"),
    (73, "Ta", "Tantalum"),
    (74, "W", "Tungsten"),
    (75, "Re", "Rhenium"),
    (76, "Os", "Osmium"),
    (77, "Ir", "Iridium"),
    (78, "Pt", "Platinum"),
    (79, "Au", "Gold"),
    (80, "Hg", "Mercury"),
    (81, "Tl", "Thallium"),
    (82, "Pb", "Lead"),
    (83, "Bi", "Bismuth"),
    (84, "Po", "Polonium"),
    (85, "At", "Astatine"),
    (86, "Rn", "Radon"),
    (87, "Fr", "Francium"),
    (88, "Ra", "Radium"),
    (89, "Ac", "Actinium"),
    (90, "Th", "Thorium"),
    (91, "Pa", "Protactinium"),
    (92, "U", "Uranium"),
    (93, "Np", "Neptunium"),
    (94, "Pu", "Plutonium"),
    (95, "Am", "Americium"),
    (96, "Cm", "Curium"),
    (97, "Bk", "Berkelium"),
    (98, "Cf", "Californium"),
    (99, "Es", "Einsteinium"),
    (100, "Fm", "Fermium"),
    (101, "Md", "Mendelevium"),
    (102, "No", "Nobelium"),
    (103, "Lr", "Lawrencium"),
    (104, "Rf", "Rutherfordium"),
    (105, "Db", "Dubnium"),
    (106, "Sg", "Seaborgium"),
    (107, "Bh", "Bohrium"),
    (108, "Hs", "Hassium"),
    (109, "Mt", "Meitnerium"),
    (110, "Ds", "Darmstadtium"),
    (111, "Rg", "Roentgenium"),
    (112, "Cn", "Copernicium"),
    (113, "Nh", "Nihonium"),
    (114, "Fl", "Flerovium"),
    (115, "Mc", "Moscovium"),
    (116, "Lv", "Livermorium"),
    (117, "Ts", "Tennessine"),
    (118, "Og", "Oganesson"),
];

static SYMBOL_INDEX: LazyLock<HashMap<&'static str, AtomicNumber>> = LazyLock::new(|| {
    ELEMENTS
        .iter()
        .map(|e| (e.symbol, e.atomic_number))
        .collect()
});

/// Look up the atomic number for a case-sensitive element symbol.
pub fn lookup(symbol: &str) -> Option<AtomicNumber> {
    SYMBOL_INDEX.get(symbol).copied()
}

/// Whether `symbol` names an element in the table.
pub fn is_element(symbol: &str) -> bool {
    SYMBOL_INDEX.contains_key(symbol)
}

/// Look up an element by atomic number.
pub fn by_atomic_number(z: AtomicNumber) -> Option<&'static Element> {
    let idx = usize::try_from(z).ok()?.checked_sub(1)?;
    ELEMENTS.get(idx)
}

/// Look up an element by symbol.
pub fn by_symbol(symbol: &str) -> Option<&'static Element> {
    lookup(symbol).and_then(by_atomic_number)
}

/// All elements in atomic-number order.
pub fn iter() -> impl Iterator<Item = &'static Element> {
    ELEMENTS.iter()
}

/// Check that the table is complete and consistent.
///
/// Every Z in 1..=118 must appear exactly once at its own position, every
/// symbol must have the `[A-Z][a-z]?` shape, and no symbol may repeat.
pub fn validate() -> Result<(), AnnotationError> {
    validate_table(&ELEMENTS, &SYMBOL_INDEX)
}

fn validate_table(
    table: &[Element],
    index: &HashMap<&'static str, AtomicNumber>,
) -> Result<(), AnnotationError> {
    if table.len() != ELEMENT_COUNT {
        return Err(AnnotationError::CorruptElementTable(format!(
            "expected {} elements, found {}",
            ELEMENT_COUNT,
            table.len()
        )));
    }

    for (i, element) in table.iter().enumerate() {
        let expected = (i + 1) as AtomicNumber;
        if element.atomic_number != expected {
            return Err(AnnotationError::CorruptElementTable(format!(
                "{} at position {} has Z={}",
                element.symbol, expected, element.atomic_number
            )));
        }
        if !is_symbol_shaped(element.symbol) {
            return Err(AnnotationError::CorruptElementTable(format!(
                "malformed symbol {:?} for Z={}",
                element.symbol, element.atomic_number
            )));
        }
    }

    if index.len() != table.len() {
        return Err(AnnotationError::CorruptElementTable(format!(
            "{} symbols map to {} elements",
            index.len(),
            table.len()
        )));
    }

    Ok(())
}

fn is_symbol_shaped(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(first), None, None) => first.is_ascii_uppercase(),
        (Some(first), Some(second), None) => {
            first.is_ascii_uppercase() && second.is_ascii_lowercase()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_valid() {
        assert!(validate().is_ok());
    }

    #[test]
    fn test_lookup_known_symbols() {
        assert_eq!(lookup("H"), Some(1));
        assert_eq!(lookup("O"), Some(8));
        assert_eq!(lookup("Na"), Some(11));
        assert_eq!(lookup("Pb"), Some(82));
        assert_eq!(lookup("Og"), Some(118));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup("pb"), None);
        assert_eq!(lookup("PB"), None);
        assert_eq!(lookup("co"), None);
        assert_eq!(lookup("Co"), Some(27));
    }

    #[test]
    fn test_lookup_unknown_symbol() {
        assert_eq!(lookup("Xx"), None);
        assert_eq!(lookup("Report"), None);
        assert_eq!(lookup(""), None);
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(by_atomic_number(92).map(|e| e.symbol), Some("U"));
        assert_eq!(by_atomic_number(0), None);
        assert_eq!(by_atomic_number(119), None);
        assert_eq!(by_symbol("Fe").map(|e| e.name), Some("Iron"));
    }

    #[test]
    fn test_iter_in_z_order() {
        let zs: Vec<AtomicNumber> = iter().map(|e| e.atomic_number).collect();
        assert_eq!(zs.len(), ELEMENT_COUNT);
        assert!(zs.windows(2).all(|w| w[0] + 1 == w[1]));
    }

    #[test]
    fn test_validate_rejects_short_table() {
        let index: HashMap<&'static str, AtomicNumber> = HashMap::new();
        let err = validate_table(&ELEMENTS[..10], &index).unwrap_err();
        assert!(matches!(err, AnnotationError::CorruptElementTable(_)));
    }

    #[test]
    fn test_validate_rejects_duplicate_symbols() {
        let mut index = SYMBOL_INDEX.clone();
        index.remove("He");
        let err = validate_table(&ELEMENTS, &index).unwrap_err();
        assert!(err.to_string().contains("symbols map to"));
    }

    #[test]
    fn test_symbol_shape() {
        assert!(is_symbol_shaped("O"));
        assert!(is_symbol_shaped("Pb"));
        assert!(!is_symbol_shaped("pb"));
        assert!(!is_symbol_shaped("PB"));
        assert!(!is_symbol_shaped("Abc"));
        assert!(!is_symbol_shaped(""));
    }
}
