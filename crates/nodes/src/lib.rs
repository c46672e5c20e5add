use std::fmt;

use indexmap::IndexMap;

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ByteVec(pub Box<[u8]>);

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Name(pub String);

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name(value.to_string())
    }
}

/// Number types. These are the only value types in the 1.0 binary format.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[repr(u8)]
pub enum ValType {
    I32 = 0x7f,
    I64 = 0x7e,
    F32 = 0x7d,
    F64 = 0x7c,
}

impl ValType {
    pub const ALL: [ValType; 4] = [ValType::I32, ValType::I64, ValType::F32, ValType::F64];

    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x7f => ValType::I32,
            0x7e => ValType::I64,
            0x7d => ValType::F32,
            0x7c => ValType::F64,
            _ => return None,
        })
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ValType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValType::I32 => "i32",
            ValType::I64 => "i64",
            ValType::F32 => "f32",
            ValType::F64 => "f64",
        })
    }
}

/// Table element types. Only `funcref` exists in the 1.0 binary format.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
#[repr(u8)]
pub enum RefType {
    #[default]
    FuncRef = 0x70,
}

impl RefType {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// A function signature: parameters then results.
///
/// The 1.0 format allows at most one result. That rule belongs to validation,
/// so nothing here stops a caller from building a multi-result `Type`.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Type {
    pub params: Box<[ValType]>,
    pub results: Box<[ValType]>,
}

impl Type {
    pub fn new(
        params: impl IntoIterator<Item = ValType>,
        results: impl IntoIterator<Item = ValType>,
    ) -> Self {
        Self {
            params: params.into_iter().collect(),
            results: results.into_iter().collect(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Limits {
    pub min: u32,
    pub max: Option<u32>,
}

impl Limits {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Self { min, max }
    }
}

/// Size of one page of linear memory, in bytes.
pub const PAGE_SIZE: u32 = 65536;

/// The largest number of pages a 32-bit memory may declare: `MAX_PAGES *
/// PAGE_SIZE` is 4GiB.
pub const MAX_PAGES: u32 = 65536;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct MemType(pub Limits);

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct TableType(pub RefType, pub Limits);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mutability {
    Const,
    Variable,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct GlobalType(pub ValType, pub Mutability);

impl GlobalType {
    pub fn is_mutable(&self) -> bool {
        matches!(self.1, Mutability::Variable)
    }
}

/// An already-encoded constant or function-body expression, including its
/// trailing `end` opcode.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Expr(pub Box<[u8]>);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct TypeIdx(pub u32);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct FuncIdx(pub u32);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct TableIdx(pub u32);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct MemIdx(pub u32);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct GlobalIdx(pub u32);

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Import {
    pub module: Name,
    pub name: Name,
    pub desc: ImportDesc,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ImportDesc {
    Func(TypeIdx),
    Table(TableType),
    Mem(MemType),
    Global(GlobalType),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Global(pub GlobalType, pub Expr);

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Export {
    pub name: Name,
    pub desc: ExportDesc,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExportDesc {
    Func(FuncIdx),
    Table(TableIdx),
    Mem(MemIdx),
    Global(GlobalIdx),
}

/// An active element segment: `init` is written into `table` at `offset`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Elem {
    pub table: TableIdx,
    pub offset: Expr,
    pub init: Vec<FuncIdx>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Local(pub u32, pub ValType);

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Code {
    pub locals: Box<[Local]>,
    pub body: Expr,
}

/// An active data segment: `init` is copied into `memory` at `offset`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Data {
    pub memory: MemIdx,
    pub offset: Expr,
    pub init: ByteVec,
}

/// Section identifiers, in the order the binary format requires them.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[repr(u8)]
pub enum SectionId {
    Custom = 0,
    Type = 1,
    Import = 2,
    Function = 3,
    Table = 4,
    Memory = 5,
    Global = 6,
    Export = 7,
    Start = 8,
    Element = 9,
    Code = 10,
    Data = 11,
}

impl SectionId {
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SectionId::Custom => "custom",
            SectionId::Type => "type",
            SectionId::Import => "import",
            SectionId::Function => "function",
            SectionId::Table => "table",
            SectionId::Memory => "memory",
            SectionId::Global => "global",
            SectionId::Export => "export",
            SectionId::Start => "start",
            SectionId::Element => "element",
            SectionId::Code => "code",
            SectionId::Data => "data",
        })
    }
}

/// Names keyed by index, kept in ascending index order on encode.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct NameMap(pub Vec<(u32, Name)>);

impl NameMap {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn append(&mut self, idx: u32, name: impl Into<String>) -> &mut Self {
        self.0.push((idx, Name(name.into())));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A two-level name map, e.g. local names grouped by function index.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct IndirectNameMap(pub Vec<(u32, NameMap)>);

impl IndirectNameMap {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn append(&mut self, idx: u32, names: NameMap) -> &mut Self {
        self.0.push((idx, names));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The debug `name` custom section.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct NameSection {
    pub module_name: Option<Name>,
    pub function_names: NameMap,
    pub local_names: IndirectNameMap,
}

/// A module as handed to the encoder. All fields are public; the encoder only
/// reads them.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Module {
    pub custom_sections: IndexMap<String, Box<[u8]>>,
    pub type_section: Vec<Type>,
    pub import_section: Vec<Import>,
    pub function_section: Vec<TypeIdx>,
    pub table_section: Vec<TableType>,
    pub memory_section: Vec<MemType>,
    pub global_section: Vec<Global>,
    pub export_section: Vec<Export>,
    pub start_section: Option<FuncIdx>,
    pub element_section: Vec<Elem>,
    pub code_section: Vec<Code>,
    pub data_section: Vec<Data>,
    pub name_section: Option<NameSection>,
}

impl Module {
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns whether the given non-custom section carries any content.
    pub fn has_section(&self, id: SectionId) -> bool {
        match id {
            SectionId::Custom => !self.custom_sections.is_empty() || self.name_section.is_some(),
            SectionId::Type => !self.type_section.is_empty(),
            SectionId::Import => !self.import_section.is_empty(),
            SectionId::Function => !self.function_section.is_empty(),
            SectionId::Table => !self.table_section.is_empty(),
            SectionId::Memory => !self.memory_section.is_empty(),
            SectionId::Global => !self.global_section.is_empty(),
            SectionId::Export => !self.export_section.is_empty(),
            SectionId::Start => self.start_section.is_some(),
            SectionId::Element => !self.element_section.is_empty(),
            SectionId::Code => !self.code_section.is_empty(),
            SectionId::Data => !self.data_section.is_empty(),
        }
    }
}
