use std::fmt;

use crate::atom::{Atom, AtomLabel, BondClause};

impl fmt::Display for BondClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{},{}}}", self.neighbor, self.order)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number)?;
        match self.label {
            Some(AtomLabel::Numbered(n)) => write!(f, " *{n}")?,
            Some(AtomLabel::Unnumbered) => write!(f, " *")?,
            None => {}
        }
        write!(f, " {} u{}", self.element, self.unpaired)?;
        if let Some(pairs) = self.pairs {
            write!(f, " p{pairs}")?;
        }
        if let Some(charge) = self.charge {
            if charge > 0 {
                write!(f, " c+{charge}")?;
            } else {
                write!(f, " c{charge}")?;
            }
        }
        if let Some(site) = &self.site {
            write!(f, " s{site}")?;
        }
        if let Some(morphology) = &self.morphology {
            write!(f, " m{morphology}")?;
        }
        for bond in &self.bonds {
            write!(f, " {bond}")?;
        }
        Ok(())
    }
}

/// Format atoms back into a newline-separated adjacency-list block.
pub fn to_adjlist(atoms: &[Atom]) -> String {
    atoms
        .iter()
        .map(Atom::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjlist::parse_atom_line;

    fn reformat(line: &str) -> String {
        parse_atom_line(line).unwrap().to_string()
    }

    #[test]
    fn canonical_line_is_unchanged() {
        let line = "1 *3 C u0 p0 c0 {2,S} {3,D}";
        assert_eq!(reformat(line), line);
    }

    #[test]
    fn charges_are_signed() {
        assert_eq!(reformat("1 N u0 p0 c1"), "1 N u0 p0 c+1");
        assert_eq!(reformat("1 O u0 p3 c-1"), "1 O u0 p3 c-1");
    }

    #[test]
    fn spacing_is_normalized() {
        assert_eq!(
            reformat("  2   H u0 p0 c0{1, S}"),
            "2 H u0 p0 c0 {1,S}"
        );
    }

    #[test]
    fn reparse_yields_same_atom() {
        for line in [
            "1 * C u1 p0 c0 {2,S} {3,S}",
            "5 *12 Cl u0 p3 c0 {1,S}",
            "1 X u0 p0 c0 sx mterrace {2,S}",
            "9 Ar u0",
        ] {
            let atom = parse_atom_line(line).unwrap();
            let again = parse_atom_line(&atom.to_string()).unwrap();
            assert_eq!(atom, again, "round trip changed {line:?}");
        }
    }

    #[test]
    fn block_formatting() {
        let atoms = vec![
            parse_atom_line("1 O u0 p2 c0 {2,S}").unwrap(),
            parse_atom_line("2 H u0 p0 c0 {1,S}").unwrap(),
        ];
        assert_eq!(to_adjlist(&atoms), "1 O u0 p2 c0 {2,S}\n2 H u0 p0 c0 {1,S}");
    }
}
