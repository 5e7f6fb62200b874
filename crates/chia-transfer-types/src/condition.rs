use chia_protocol::Bytes;
use clvm_traits::{FromClvm, FromClvmError};
use clvmr::{Allocator, NodePtr, SExp};

pub const AGG_SIG_UNSAFE: u16 = 49;
pub const AGG_SIG_ME: u16 = 50;
pub const CREATE_COIN: u16 = 51;

/// A single argument of a condition. Most arguments are atoms, but some conditions
/// (such as the memos of `CREATE_COIN`) carry nested lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionArg {
    Atom(Bytes),
    List(Vec<ConditionArg>),
}

impl ConditionArg {
    pub fn as_atom(&self) -> Option<&Bytes> {
        match self {
            Self::Atom(bytes) => Some(bytes),
            Self::List(_) => None,
        }
    }

    fn from_node(allocator: &Allocator, node: NodePtr) -> Result<Self, FromClvmError> {
        match allocator.sexp(node) {
            SExp::Atom => Ok(Self::Atom(allocator.atom(node).as_ref().to_vec().into())),
            SExp::Pair(..) => Ok(Self::List(
                list_items(allocator, node)?
                    .into_iter()
                    .map(|item| Self::from_node(allocator, item))
                    .collect::<Result<_, _>>()?,
            )),
        }
    }
}

/// A condition output by running a puzzle with its solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub opcode: u16,
    pub args: Vec<ConditionArg>,
}

impl Condition {
    pub fn new(opcode: u16, args: Vec<ConditionArg>) -> Self {
        Self { opcode, args }
    }

    /// Parses the list of conditions output by a puzzle, leaving out the conditions
    /// with opcodes that are not small integers.
    pub fn parse_list(allocator: &Allocator, output: NodePtr) -> Result<Vec<Self>, FromClvmError> {
        let mut conditions = Vec::new();

        for condition in list_items(allocator, output)? {
            if let Some(condition) = Self::parse(allocator, condition)? {
                conditions.push(condition);
            }
        }

        Ok(conditions)
    }

    /// Parses a single `(opcode . args)` condition. Returns `None` if the opcode is not a
    /// canonical integer that fits in a `u16`, since such conditions have no effect.
    pub fn parse(
        allocator: &Allocator,
        condition: NodePtr,
    ) -> Result<Option<Self>, FromClvmError> {
        let SExp::Pair(opcode, rest) = allocator.sexp(condition) else {
            return Err(FromClvmError::ExpectedPair);
        };

        let Some(opcode) = parse_opcode(allocator, opcode) else {
            return Ok(None);
        };

        let args: Vec<ConditionArg> = list_items(allocator, rest)?
            .into_iter()
            .map(|arg| ConditionArg::from_node(allocator, arg))
            .collect::<Result<_, _>>()?;

        Ok(Some(Self { opcode, args }))
    }
}

fn parse_opcode(allocator: &Allocator, node: NodePtr) -> Option<u16> {
    if !matches!(allocator.sexp(node), SExp::Atom) {
        return None;
    }

    match *allocator.atom(node).as_ref() {
        [byte] if byte < 0x80 => Some(byte.into()),
        [high, low] if high < 0x80 && (high != 0 || low >= 0x80) => {
            Some(u16::from_be_bytes([high, low]))
        }
        _ => None,
    }
}

/// The items of a list, which must be terminated by nil.
fn list_items(allocator: &Allocator, node: NodePtr) -> Result<Vec<NodePtr>, FromClvmError> {
    Vec::<NodePtr>::from_clvm(allocator, node)
}

#[cfg(test)]
mod tests {
    use chia_protocol::Bytes32;
    use clvm_traits::ToClvm;

    use super::*;

    #[test]
    fn test_parse_conditions() -> anyhow::Result<()> {
        let mut allocator = Allocator::new();

        let public_key = Bytes::new(vec![7; 48]);
        let message = Bytes::new(vec![1, 2, 3]);
        let memo = Bytes::new(vec![9; 32]);

        let output = (
            (AGG_SIG_ME, (public_key.clone(), (message.clone(), ()))),
            ((CREATE_COIN, (Bytes32::new([4; 32]), (1000_u64, (vec![memo.clone()], ())))), ()),
        )
            .to_clvm(&mut allocator)?;

        let conditions = Condition::parse_list(&allocator, output)?;

        assert_eq!(
            conditions,
            vec![
                Condition::new(
                    AGG_SIG_ME,
                    vec![ConditionArg::Atom(public_key), ConditionArg::Atom(message)]
                ),
                Condition::new(
                    CREATE_COIN,
                    vec![
                        ConditionArg::Atom(Bytes::new(vec![4; 32])),
                        ConditionArg::Atom(Bytes::new(vec![0x03, 0xe8])),
                        ConditionArg::List(vec![ConditionArg::Atom(memo)]),
                    ]
                ),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_empty_condition() -> anyhow::Result<()> {
        let mut allocator = Allocator::new();
        let output = vec![()].to_clvm(&mut allocator)?;
        assert!(Condition::parse_list(&allocator, output).is_err());
        Ok(())
    }

    #[test]
    fn test_skip_unknown_opcodes() -> anyhow::Result<()> {
        let mut allocator = Allocator::new();

        let wide = Bytes::new(vec![0x01, 0x00, 0x00]);
        let padded = Bytes::new(vec![0x00, 0x32]);
        let negative = Bytes::new(vec![0xff]);
        let public_key = Bytes::new(vec![7; 48]);

        let output = (
            (wide, (1_u64, (2_u64, ()))),
            (
                (padded, (3_u64, ())),
                (
                    (negative, ()),
                    ((AGG_SIG_ME, (public_key.clone(), (Bytes::new(vec![1]), ()))), ()),
                ),
            ),
        )
            .to_clvm(&mut allocator)?;

        assert_eq!(
            Condition::parse_list(&allocator, output)?,
            vec![Condition::new(
                AGG_SIG_ME,
                vec![
                    ConditionArg::Atom(public_key),
                    ConditionArg::Atom(Bytes::new(vec![1]))
                ]
            )]
        );

        Ok(())
    }

    #[test]
    fn test_two_byte_opcode() -> anyhow::Result<()> {
        let mut allocator = Allocator::new();
        let output = vec![(Bytes::new(vec![0x00, 0x80]), ())].to_clvm(&mut allocator)?;

        assert_eq!(
            Condition::parse_list(&allocator, output)?,
            vec![Condition::new(0x80, Vec::new())]
        );

        Ok(())
    }

    #[test]
    fn test_improper_lists() -> anyhow::Result<()> {
        let mut allocator = Allocator::new();
        let public_key = Bytes::new(vec![7; 48]);

        let args = (public_key.clone(), (Bytes::new(vec![1]), 7_u64));
        let improper_args = vec![(AGG_SIG_ME, args)].to_clvm(&mut allocator)?;
        assert!(Condition::parse_list(&allocator, improper_args).is_err());

        let args = (public_key, (1_u64, ((Bytes::new(vec![1]), 7_u64), ())));
        let improper_memos = vec![(CREATE_COIN, args)].to_clvm(&mut allocator)?;
        assert!(Condition::parse_list(&allocator, improper_memos).is_err());

        let improper_output = ((AGG_SIG_UNSAFE, ()), 7_u64).to_clvm(&mut allocator)?;
        assert!(Condition::parse_list(&allocator, improper_output).is_err());

        Ok(())
    }

    #[test]
    fn test_as_atom() {
        let atom = ConditionArg::Atom(Bytes::new(vec![1]));
        let list = ConditionArg::List(vec![atom.clone()]);
        assert_eq!(atom.as_atom(), Some(&Bytes::new(vec![1])));
        assert_eq!(list.as_atom(), None);
    }
}
