use std::str::FromStr;

use crate::atom::{Atom, AtomLabel, BondClause};

use super::error::AdjListError;

/// Parse a single atom line such as `1 *2 C u0 p0 c0 {2,S} {3,D}`.
///
/// The line is trimmed first. Parsing looks at this line only; bare `*`
/// labels come back as [`AtomLabel::Unnumbered`].
pub fn parse_atom_line(line: &str) -> Result<Atom, AdjListError> {
    let trimmed = line.trim();
    Scanner::new(trimmed)
        .atom()
        .map_err(|reason| AdjListError::malformed(trimmed, reason))
}

impl FromStr for Atom {
    type Err = AdjListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_atom_line(s)
    }
}

// Rank of each optional field; fields must appear in increasing rank.
const RANK_PAIRS: u8 = 1;
const RANK_CHARGE: u8 = 2;
const RANK_SITE: u8 = 3;
const RANK_MORPHOLOGY: u8 = 4;

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn expect_ws(&mut self, reason: &'static str) -> Result<(), &'static str> {
        if self.skip_ws() {
            Ok(())
        } else {
            Err(reason)
        }
    }

    fn digits(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        (self.pos > start).then(|| &self.text[start..self.pos])
    }

    fn number<T: FromStr>(&mut self, reason: &'static str) -> Result<T, &'static str> {
        self.digits()
            .ok_or(reason)?
            .parse()
            .map_err(|_| "number out of range")
    }

    fn atom(&mut self) -> Result<Atom, &'static str> {
        let number = self.number("expected atom number")?;
        self.expect_ws("expected whitespace after atom number")?;

        let label = if self.peek() == Some(b'*') {
            self.pos += 1;
            let label = match self.digits() {
                Some(d) => AtomLabel::Numbered(d.parse().map_err(|_| "label out of range")?),
                None => AtomLabel::Unnumbered,
            };
            self.expect_ws("expected whitespace after label")?;
            Some(label)
        } else {
            None
        };

        let element = self.element()?;
        self.expect_ws("expected whitespace after element")?;

        if self.peek() != Some(b'u') {
            return Err("expected unpaired electron count");
        }
        self.pos += 1;
        let unpaired = self.number("expected digits after 'u'")?;

        let mut atom = Atom {
            number,
            label,
            element,
            unpaired,
            ..Atom::default()
        };
        self.optional_fields(&mut atom)?;
        self.bonds(&mut atom)?;
        Ok(atom)
    }

    fn element(&mut self) -> Result<String, &'static str> {
        let start = self.pos;
        match self.peek() {
            Some(b) if b.is_ascii_uppercase() => self.pos += 1,
            _ => return Err("expected element symbol"),
        }
        if matches!(self.peek(), Some(b) if b.is_ascii_lowercase()) {
            self.pos += 1;
        }
        Ok(self.text[start..self.pos].to_string())
    }

    fn optional_fields(&mut self, atom: &mut Atom) -> Result<(), &'static str> {
        let mut stage = 0u8;
        loop {
            let had_ws = self.skip_ws();
            let rank = match self.peek() {
                None | Some(b'{') => return Ok(()),
                Some(b'p') => RANK_PAIRS,
                Some(b'c') => RANK_CHARGE,
                Some(b's') => RANK_SITE,
                Some(b'm') => RANK_MORPHOLOGY,
                Some(_) => return Err("unexpected character after unpaired electron count"),
            };
            if !had_ws {
                return Err("expected whitespace between fields");
            }
            if rank <= stage {
                return Err("field repeated or out of order");
            }
            stage = rank;
            self.pos += 1;

            match rank {
                RANK_PAIRS => atom.pairs = Some(self.number("expected digits after 'p'")?),
                RANK_CHARGE => atom.charge = Some(self.charge()?),
                RANK_SITE => atom.site = Some(self.tag()?),
                _ => atom.morphology = Some(self.tag()?),
            }
        }
    }

    fn charge(&mut self) -> Result<i32, &'static str> {
        let negative = match self.peek() {
            Some(b'+') => {
                self.pos += 1;
                false
            }
            Some(b'-') => {
                self.pos += 1;
                true
            }
            _ => false,
        };
        let magnitude: i32 = self.number("expected digits after 'c'")?;
        Ok(if negative { -magnitude } else { magnitude })
    }

    fn tag(&mut self) -> Result<String, &'static str> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if !b.is_ascii_whitespace() && b != b'{') {
            self.pos += 1;
        }
        if self.pos == start {
            return Err("empty site or morphology tag");
        }
        Ok(self.text[start..self.pos].to_string())
    }

    fn bonds(&mut self, atom: &mut Atom) -> Result<(), &'static str> {
        while self.peek() == Some(b'{') {
            self.pos += 1;
            self.skip_ws();
            let neighbor = self.number("expected neighbor number in bond")?;
            self.skip_ws();
            if self.peek() != Some(b',') {
                return Err("expected ',' in bond");
            }
            self.pos += 1;

            let start = self.pos;
            while matches!(self.peek(), Some(b) if b != b'}' && b != b'{') {
                self.pos += 1;
            }
            if self.peek() != Some(b'}') {
                return Err("unterminated bond");
            }
            let order = self.text[start..self.pos].trim();
            if order.is_empty() || order.contains([',', ' ', '\t']) {
                return Err("invalid bond order");
            }
            self.pos += 1;

            atom.bonds.push(BondClause {
                neighbor,
                order: order.to_string(),
            });
            self.skip_ws();
        }

        if self.at_end() {
            Ok(())
        } else {
            Err("unexpected trailing text")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Atom {
        parse_atom_line(line).unwrap_or_else(|e| panic!("bad atom line {line:?}: {e}"))
    }

    fn reason(line: &str) -> &'static str {
        match parse_atom_line(line) {
            Err(AdjListError::MalformedAtomLine { reason, .. }) => reason,
            other => panic!("expected malformed line for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn full_line() {
        let atom = parse("1 *3 C u0 p0 c0 {2,S} {3,D}");
        assert_eq!(atom.number, 1);
        assert_eq!(atom.label, Some(AtomLabel::Numbered(3)));
        assert_eq!(atom.element, "C");
        assert_eq!(atom.unpaired, 0);
        assert_eq!(atom.pairs, Some(0));
        assert_eq!(atom.charge, Some(0));
        assert_eq!(atom.bonds.len(), 2);
        assert_eq!(atom.bonds[1].neighbor, 3);
        assert_eq!(atom.bonds[1].order, "D");
    }

    #[test]
    fn minimal_line() {
        let atom = parse("7 H u1");
        assert_eq!(atom.number, 7);
        assert_eq!(atom.label, None);
        assert_eq!(atom.unpaired, 1);
        assert_eq!(atom.pairs, None);
        assert_eq!(atom.charge, None);
        assert!(atom.bonds.is_empty());
    }

    #[test]
    fn bare_star_is_unnumbered() {
        let atom = parse("2 * O u1 p2 c0 {1,S}");
        assert_eq!(atom.label, Some(AtomLabel::Unnumbered));
        assert_eq!(atom.element, "O");
    }

    #[test]
    fn two_letter_element() {
        let atom = parse("3 Cl u0 p3 c0 {1,S}");
        assert_eq!(atom.element, "Cl");
        assert_eq!(atom.pairs, Some(3));
    }

    #[test]
    fn signed_charges() {
        assert_eq!(parse("1 O u0 p3 c-1").charge, Some(-1));
        assert_eq!(parse("1 N u0 p0 c+1").charge, Some(1));
        assert_eq!(parse("1 N u0 p0 c2").charge, Some(2));
    }

    #[test]
    fn bond_directly_after_charge() {
        let atom = parse("1 C u0 p0 c0{2,S}{3,T}");
        assert_eq!(atom.bonds.len(), 2);
        assert_eq!(atom.bonds[0].neighbor, 2);
        assert_eq!(atom.bonds[1].order, "T");
    }

    #[test]
    fn whitespace_inside_bond() {
        let atom = parse("1 C u0 { 2 , S }");
        assert_eq!(atom.bonds[0].neighbor, 2);
        assert_eq!(atom.bonds[0].order, "S");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let atom = parse("   4 H u0 p0 c0 {1,S}   ");
        assert_eq!(atom.number, 4);
    }

    #[test]
    fn site_and_morphology_pass_through() {
        let atom = parse("1 X u0 p0 c0 sx mterrace {2,S}");
        assert_eq!(atom.site.as_deref(), Some("x"));
        assert_eq!(atom.morphology.as_deref(), Some("terrace"));
        assert_eq!(atom.bonds.len(), 1);
    }

    #[test]
    fn from_str_delegates() {
        let atom: Atom = "1 C u0".parse().unwrap();
        assert_eq!(atom.element, "C");
    }

    #[test]
    fn missing_unpaired_count() {
        assert_eq!(reason("1 C p0 c0"), "expected unpaired electron count");
    }

    #[test]
    fn missing_number() {
        assert_eq!(reason("C u0"), "expected atom number");
    }

    #[test]
    fn lowercase_element_rejected() {
        assert_eq!(reason("1 c u0"), "expected element symbol");
    }

    #[test]
    fn fields_out_of_order() {
        assert_eq!(reason("1 C u0 c0 p0"), "field repeated or out of order");
        assert_eq!(reason("1 C u0 p0 p1"), "field repeated or out of order");
    }

    #[test]
    fn unterminated_bond() {
        assert_eq!(reason("1 C u0 {2,S"), "unterminated bond");
    }

    #[test]
    fn empty_bond_order() {
        assert_eq!(reason("1 C u0 {2,}"), "invalid bond order");
    }

    #[test]
    fn trailing_garbage() {
        assert_eq!(reason("1 C u0 {2,S} junk"), "unexpected trailing text");
    }

    #[test]
    fn error_names_the_line() {
        let err = parse_atom_line("  bogus  ").unwrap_err();
        assert_eq!(
            err,
            AdjListError::MalformedAtomLine {
                line: "bogus".to_string(),
                reason: "expected atom number",
            }
        );
        assert!(err.to_string().contains("\"bogus\""));
    }
}
