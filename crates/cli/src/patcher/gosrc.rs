//! Narrow structural patching of Go source.
//!
//! The scanner walks the file once, skipping comments and string literals,
//! and records byte spans for the handful of top-level shapes the register
//! flow needs: the `package` clause, the first `import` declaration and
//! `var NAME = T{...}` composite literals. Every other byte is left exactly
//! as it was; the patch is a pair of insertions spliced in back to front.

use std::ops::Range;
use std::path::Path;

use alloy_primitives::Address;
use anyhow::Context;
use roller_config::consts::PRECOMPILED_MAP_VAR;
use roller_types::ContractIdentifiers;
use xshell::Shell;

use super::PatchError;

/// Reads the registry file, splices the import and map entry in, and writes
/// it back in place.
pub fn register_precompile(
    shell: &Shell,
    path: &Path,
    address: Address,
    identifiers: &ContractIdentifiers,
) -> anyhow::Result<()> {
    let source = shell
        .read_file(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let patched = patch_contracts_source(&source, address, identifiers)
        .with_context(|| format!("failed to patch {}", path.display()))?;
    if patched != source {
        shell
            .write_file(path, patched)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

/// Inserts the registry entry for `address` into the Cancun precompile map
/// and the package import into the first import declaration. Entries and
/// imports that are already present are not duplicated.
pub fn patch_contracts_source(
    source: &str,
    address: Address,
    identifiers: &ContractIdentifiers,
) -> Result<String, PatchError> {
    let map = scan(source)?;

    let mut literals = map
        .map_literals
        .iter()
        .filter(|literal| literal.name == PRECOMPILED_MAP_VAR);
    let literal = match (literals.next(), literals.next()) {
        (None, _) => return Err(PatchError::AnchorNotFound(PRECOMPILED_MAP_VAR)),
        (Some(literal), None) => literal,
        (Some(_), Some(_)) => return Err(PatchError::AmbiguousAnchor(PRECOMPILED_MAP_VAR)),
    };

    let key = format!(
        "common.BytesToAddress([]byte{{{}}})",
        address_bytes(&address)
    );
    let entry = format!(
        "{key}: &{}.{}{{}},",
        identifiers.package_name, identifiers.struct_name
    );
    let import_spec = format!("\"{}\"", identifiers.package_name);

    let mut edits = Vec::new();

    if !source[literal.body.clone()].contains(&key) {
        let close = literal.body.end - 1;
        let mut text = format!("\t{entry}\n");
        if !source[..close].ends_with('\n') {
            text.insert(0, '\n');
        }
        edits.push(Edit { pos: close, text });
    }

    match &map.import {
        Some(import) if source[import.span.clone()].contains(&import_spec) => {}
        Some(import) => match import.block_close {
            Some(close) => {
                let mut text = format!("\t{import_spec}\n");
                if !source[..close].ends_with('\n') {
                    text.insert(0, '\n');
                }
                edits.push(Edit { pos: close, text });
            }
            None => {
                edits.push(Edit {
                    pos: import.end,
                    text: format!("import {import_spec}\n"),
                });
            }
        },
        None => {
            let Some(after_package) = map.package_clause_end else {
                return Err(PatchError::Parse("no package clause".into()));
            };
            edits.push(Edit {
                pos: after_package,
                text: format!("\nimport {import_spec}\n"),
            });
        }
    }

    Ok(apply_edits(source, edits))
}

/// Address bytes rendered the way the registry spells them, with leading
/// zero bytes trimmed. The zero address renders as a single zero byte.
fn address_bytes(address: &Address) -> String {
    let bytes = address.as_slice();
    let significant = match bytes.iter().position(|byte| *byte != 0) {
        Some(first) => &bytes[first..],
        None => &bytes[bytes.len() - 1..],
    };
    significant
        .iter()
        .map(|byte| format!("0x{byte:02x}"))
        .collect::<Vec<_>>()
        .join(", ")
}

struct Edit {
    pos: usize,
    text: String,
}

fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| b.pos.cmp(&a.pos));
    let mut patched = source.to_string();
    for edit in edits {
        patched.insert_str(edit.pos, &edit.text);
    }
    patched
}

/// Byte positions of the declarations the patch targets.
#[derive(Debug, Default)]
struct SourceMap {
    /// One past the `package` clause line, including its newline.
    package_clause_end: Option<usize>,
    /// First import declaration.
    import: Option<ImportDecl>,
    /// Top-level `var NAME = T{...}` declarations.
    map_literals: Vec<MapLiteral>,
}

#[derive(Debug)]
struct ImportDecl {
    /// Position of the closing `)` for parenthesized blocks.
    block_close: Option<usize>,
    /// One past the declaration, including its trailing newline.
    end: usize,
    /// Whole declaration, for the duplicate-spec check.
    span: Range<usize>,
}

#[derive(Debug)]
struct MapLiteral {
    name: String,
    /// The `{...}` literal, braces included.
    body: Range<usize>,
}

fn scan(src: &str) -> Result<SourceMap, PatchError> {
    let mut map = SourceMap::default();
    let mut s = Scanner::new(src);
    let mut depth = 0usize;

    while let Some(byte) = s.peek() {
        if s.skip_trivia()? {
            continue;
        }
        if depth == 0 && s.at_line_start() {
            let start = s.pos;
            if s.eat_keyword(b"package") {
                map.package_clause_end = Some(s.skip_to_line_end());
                continue;
            }
            if s.eat_keyword(b"import") {
                let decl = s.scan_import(start)?;
                if map.import.is_none() {
                    map.import = Some(decl);
                }
                continue;
            }
            if s.eat_keyword(b"var") {
                if let Some(literal) = s.scan_var()? {
                    map.map_literals.push(literal);
                }
                continue;
            }
        }
        match byte {
            b'{' | b'(' | b'[' => depth += 1,
            b'}' | b')' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        s.pos += 1;
    }

    Ok(map)
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.bytes[self.pos - 1] == b'\n'
    }

    /// Consumes a comment or a string/rune literal if one starts here.
    fn skip_trivia(&mut self) -> Result<bool, PatchError> {
        match self.peek() {
            Some(b'/') if self.peek_at(1) == Some(b'/') => {
                self.skip_line_comment();
                Ok(true)
            }
            Some(b'/') if self.peek_at(1) == Some(b'*') => {
                self.skip_block_comment()?;
                Ok(true)
            }
            Some(b'"') => {
                self.skip_quoted(b'"')?;
                Ok(true)
            }
            Some(b'\'') => {
                self.skip_quoted(b'\'')?;
                Ok(true)
            }
            Some(b'`') => {
                self.skip_raw_string()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == b'\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), PatchError> {
        self.pos += 2;
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] == b'*' && self.peek_at(1) == Some(b'/') {
                self.pos += 2;
                return Ok(());
            }
            self.pos += 1;
        }
        Err(PatchError::Parse("unterminated block comment".into()))
    }

    fn skip_quoted(&mut self, quote: u8) -> Result<(), PatchError> {
        self.pos += 1;
        while let Some(byte) = self.peek() {
            match byte {
                b'\\' => self.pos += 2,
                b'\n' => break,
                _ if byte == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
        Err(PatchError::Parse("unterminated string literal".into()))
    }

    fn skip_raw_string(&mut self) -> Result<(), PatchError> {
        self.pos += 1;
        while let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == b'`' {
                return Ok(());
            }
        }
        Err(PatchError::Parse("unterminated raw string".into()))
    }

    fn skip_horizontal_space(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
            self.pos += 1;
        }
    }

    /// Consumes through the end of the current line. Returns the position
    /// after the newline.
    fn skip_to_line_end(&mut self) -> usize {
        while let Some(byte) = self.peek() {
            self.pos += 1;
            if byte == b'\n' {
                break;
            }
        }
        self.pos
    }

    /// Consumes `keyword` if it starts here and ends at a word boundary.
    fn eat_keyword(&mut self, keyword: &[u8]) -> bool {
        let end = self.pos + keyword.len();
        if self.bytes.len() < end || &self.bytes[self.pos..end] != keyword {
            return false;
        }
        match self.bytes.get(end) {
            Some(byte) if byte.is_ascii_alphanumeric() || *byte == b'_' => false,
            _ => {
                self.pos = end;
                true
            }
        }
    }

    /// Scans an import declaration, `pos` standing right after the keyword.
    fn scan_import(&mut self, start: usize) -> Result<ImportDecl, PatchError> {
        self.skip_horizontal_space();
        if self.peek() != Some(b'(') {
            let end = self.skip_to_line_end();
            return Ok(ImportDecl {
                block_close: None,
                end,
                span: start..end,
            });
        }
        self.pos += 1;
        loop {
            if self.skip_trivia()? {
                continue;
            }
            match self.peek() {
                None => return Err(PatchError::Parse("unterminated import block".into())),
                Some(b')') => break,
                Some(_) => self.pos += 1,
            }
        }
        let block_close = self.pos;
        self.pos += 1;
        let end = self.skip_to_line_end();
        Ok(ImportDecl {
            block_close: Some(block_close),
            end,
            span: start..end,
        })
    }

    /// Scans a `var` declaration, `pos` standing right after the keyword.
    /// Returns the composite literal on the right-hand side, or `None` when
    /// the declaration has another shape (grouped block, no initializer, no
    /// literal).
    fn scan_var(&mut self) -> Result<Option<MapLiteral>, PatchError> {
        self.skip_horizontal_space();
        if self.peek() == Some(b'(') {
            return Ok(None);
        }

        let name_start = self.pos;
        while let Some(byte) = self.peek() {
            if byte == b'_' || byte.is_ascii_alphanumeric() {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == name_start {
            return Ok(None);
        }
        let name = self.src[name_start..self.pos].to_string();

        self.skip_horizontal_space();
        if self.peek() != Some(b'=') {
            return Ok(None);
        }
        self.pos += 1;

        // Find the opening brace of the literal. Brackets in the type
        // expression (map keys, array lengths) nest before it.
        let mut brackets = 0usize;
        let open = loop {
            if self.skip_trivia()? {
                continue;
            }
            match self.peek() {
                None => return Ok(None),
                Some(b'[') => {
                    brackets += 1;
                    self.pos += 1;
                }
                Some(b']') => {
                    brackets = brackets.saturating_sub(1);
                    self.pos += 1;
                }
                Some(b'{') if brackets == 0 => break self.pos,
                Some(b'\n') | Some(b';') if brackets == 0 => return Ok(None),
                Some(_) => self.pos += 1,
            }
        };

        self.pos += 1;
        let mut depth = 1usize;
        while depth > 0 {
            if self.skip_trivia()? {
                continue;
            }
            match self.peek() {
                None => {
                    return Err(PatchError::Parse(format!(
                        "unterminated composite literal in var {name}"
                    )))
                }
                Some(b'{') | Some(b'(') | Some(b'[') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(b'}') | Some(b')') | Some(b']') => {
                    depth -= 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }

        Ok(Some(MapLiteral {
            name,
            body: open..self.pos,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACTS_FIXTURE: &str = r#"package vm

import (
	"errors"

	"github.com/ethereum/go-ethereum/common"
)

// PrecompiledContract is the basic interface for native Go contracts.
// A stray brace in a comment: }
type PrecompiledContract interface {
	RequiredGas(input []byte) uint64
	Run(input []byte) ([]byte, error)
}

var PrecompiledContractsHomestead = map[common.Address]PrecompiledContract{
	common.BytesToAddress([]byte{0x01}): &ecrecover{},
}

var PrecompiledContractsCancun = map[common.Address]PrecompiledContract{
	common.BytesToAddress([]byte{0x01}): &ecrecover{},
	common.BytesToAddress([]byte{0x0a}): &kzgPointEvaluation{},
}

func init() {
	_ = errors.New("var PrecompiledContractsCancun = {")
	_ = 'x'
}
"#;

    fn identifiers() -> ContractIdentifiers {
        ContractIdentifiers::derive("my-contract").unwrap()
    }

    fn address(hex: &str) -> Address {
        hex.parse().unwrap()
    }

    #[test]
    fn appends_entry_to_registry_map() {
        let patched = patch_contracts_source(
            CONTRACTS_FIXTURE,
            address("0x0000000000000000000000000000000000000100"),
            &identifiers(),
        )
        .unwrap();

        let entry = "\tcommon.BytesToAddress([]byte{0x01, 0x00}): &mycontract.MyContract{},";
        assert!(patched.contains(entry));

        let kzg = patched.find("kzgPointEvaluation").unwrap();
        assert!(patched.find(entry).unwrap() > kzg);
    }

    #[test]
    fn leaves_other_maps_and_entries_untouched() {
        let patched = patch_contracts_source(
            CONTRACTS_FIXTURE,
            address("0x0000000000000000000000000000000000000100"),
            &identifiers(),
        )
        .unwrap();

        let homestead = "var PrecompiledContractsHomestead = map[common.Address]PrecompiledContract{\n\tcommon.BytesToAddress([]byte{0x01}): &ecrecover{},\n}";
        assert!(patched.contains(homestead));
        assert_eq!(patched.matches("&mycontract.MyContract{}").count(), 1);
    }

    #[test]
    fn adds_import_spec_to_existing_block() {
        let patched = patch_contracts_source(
            CONTRACTS_FIXTURE,
            address("0x0000000000000000000000000000000000000100"),
            &identifiers(),
        )
        .unwrap();

        assert!(patched.contains("\t\"github.com/ethereum/go-ethereum/common\"\n\t\"mycontract\"\n)"));
    }

    #[test]
    fn creates_import_when_file_has_none() {
        let source = "package vm\n\nvar PrecompiledContractsCancun = map[common.Address]PrecompiledContract{\n}\n";
        let patched = patch_contracts_source(
            source,
            address("0x0000000000000000000000000000000000000009"),
            &identifiers(),
        )
        .unwrap();

        assert!(patched.starts_with("package vm\n\nimport \"mycontract\"\n"));
        assert!(patched.contains("\tcommon.BytesToAddress([]byte{0x09}): &mycontract.MyContract{},\n}"));
    }

    #[test]
    fn appends_statement_after_single_import() {
        let source = "package vm\n\nimport \"errors\"\n\nvar PrecompiledContractsCancun = map[common.Address]PrecompiledContract{\n}\n";
        let patched = patch_contracts_source(
            source,
            address("0x0000000000000000000000000000000000000009"),
            &identifiers(),
        )
        .unwrap();

        assert!(patched.contains("import \"errors\"\nimport \"mycontract\"\n"));
    }

    #[test]
    fn missing_registry_map_is_an_anchor_error() {
        let source = "package vm\n\nvar PrecompiledContractsHomestead = map[common.Address]PrecompiledContract{\n}\n";
        let err = patch_contracts_source(
            source,
            address("0x0000000000000000000000000000000000000009"),
            &identifiers(),
        )
        .unwrap_err();
        assert!(matches!(err, PatchError::AnchorNotFound(_)));
    }

    #[test]
    fn duplicate_registry_map_is_ambiguous() {
        let source = "package vm\n\nvar PrecompiledContractsCancun = T{\n}\n\nvar PrecompiledContractsCancun = T{\n}\n";
        let err = patch_contracts_source(
            source,
            address("0x0000000000000000000000000000000000000009"),
            &identifiers(),
        )
        .unwrap_err();
        assert!(matches!(err, PatchError::AmbiguousAnchor(_)));
    }

    #[test]
    fn repatching_does_not_duplicate() {
        let addr = address("0x0000000000000000000000000000000000000100");
        let once = patch_contracts_source(CONTRACTS_FIXTURE, addr, &identifiers()).unwrap();
        let twice = patch_contracts_source(&once, addr, &identifiers()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn renders_zero_address_as_single_byte() {
        assert_eq!(
            address_bytes(&address("0x0000000000000000000000000000000000000000")),
            "0x00"
        );
    }

    #[test]
    fn trims_leading_zero_bytes() {
        assert_eq!(
            address_bytes(&address("0x0000000000000000000000000000000000000a99")),
            "0x0a, 0x99"
        );
        assert_eq!(
            address_bytes(&address("0xff00000000000000000000000000000000000000")),
            "0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00"
        );
    }

    #[test]
    fn ignores_braces_inside_strings_and_comments() {
        // The fixture hides an unbalanced brace in a string literal.
        let patched = patch_contracts_source(
            CONTRACTS_FIXTURE,
            address("0x0000000000000000000000000000000000000100"),
            &identifiers(),
        )
        .unwrap();
        assert!(patched.contains("&mycontract.MyContract{},\n}\n\nfunc init() {"));
    }

    #[test]
    fn patches_file_in_place() {
        let shell = Shell::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contracts.go");
        shell.write_file(&path, CONTRACTS_FIXTURE).unwrap();

        register_precompile(
            &shell,
            &path,
            address("0x0000000000000000000000000000000000000100"),
            &identifiers(),
        )
        .unwrap();

        let patched = shell.read_file(&path).unwrap();
        assert!(patched.contains("&mycontract.MyContract{}"));
        assert!(patched.contains("\"mycontract\""));
    }
}
