use std::fmt;

use crate::types::{Scalar, ScalarType};

/// One column of a matrix block: a name and a scalar kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ScalarType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ScalarType) -> Self {
        Self { name: name.into(), ty }
    }
}

/// Ordered column list of a matrix block.
///
/// Column order defines the row byte layout: the offset of a column is the
/// sum of the widths of all columns declared before it, without padding.
/// Column names are unique within one header; nothing is enforced across
/// blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixHeader {
    columns: Vec<Column>,
    stride: usize,
}

impl MatrixHeader {
    pub fn new(columns: Vec<Column>) -> Result<Self, MatrixError> {
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(MatrixError::DuplicateColumn { name: col.name.clone() });
            }
        }
        let stride = columns.iter().map(|c| c.ty.width()).sum();
        Ok(Self { columns, stride })
    }

    /// Convenience constructor from `(name, type)` pairs.
    pub fn from_pairs(pairs: &[(&str, ScalarType)]) -> Result<Self, MatrixError> {
        Self::new(pairs.iter().map(|(n, t)| Column::new(*n, *t)).collect())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Byte width of one row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Byte offset of the given column within a row.
    pub fn offset(&self, idx: usize) -> usize {
        self.columns[..idx].iter().map(|c| c.ty.width()).sum()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }
}

/// A named, column-typed, row-major record array.
///
/// The raw row data is kept as received; cells are decoded on access. The
/// constructors enforce the structural invariant
/// `data.len() == rows * header.stride()`, so an existing `Matrix` value is
/// always internally consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    name: String,
    header: MatrixHeader,
    rows: usize,
    data: Vec<u8>,
}

impl Matrix {
    /// Build a matrix from raw row-major bytes.
    pub fn from_raw(
        name: impl Into<String>,
        header: MatrixHeader,
        rows: usize,
        data: Vec<u8>,
    ) -> Result<Self, MatrixError> {
        let expected = rows * header.stride();
        if data.len() != expected {
            return Err(MatrixError::SizeMismatch { expected, actual: data.len() });
        }
        Ok(Self { name: name.into(), header, rows, data })
    }

    /// Build a matrix from typed cell values, one slice per row.
    pub fn from_rows(
        name: impl Into<String>,
        header: MatrixHeader,
        rows: &[&[Scalar]],
    ) -> Result<Self, MatrixError> {
        let mut data = Vec::with_capacity(rows.len() * header.stride());
        for row in rows {
            if row.len() != header.len() {
                return Err(MatrixError::ColumnCountMismatch {
                    header: header.len(),
                    data: row.len(),
                });
            }
            for (cell, col) in row.iter().zip(header.columns()) {
                if cell.ty() != col.ty {
                    return Err(MatrixError::CellTypeMismatch {
                        column: col.name.clone(),
                        expected: col.ty,
                        found: cell.ty(),
                    });
                }
                // Writing into a Vec cannot fail.
                let _ = cell.write_to(&mut data);
            }
        }
        let rows = rows.len();
        Self::from_raw(name, header, rows, data)
    }

    /// An empty matrix with the given header.
    pub fn empty(name: impl Into<String>, header: MatrixHeader) -> Self {
        Self { name: name.into(), header, rows: 0, data: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &MatrixHeader {
        &self.header
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decode one cell.
    ///
    /// # Panics
    /// Panics if `row` or `col` is out of range.
    pub fn get(&self, row: usize, col: usize) -> Scalar {
        assert!(row < self.rows && col < self.header.len(), "cell index out of range");
        let start = row * self.header.stride() + self.header.offset(col);
        let ty = self.header.columns()[col].ty;
        let mut slice = &self.data[start..start + ty.width()];
        // The slice has exactly the encoded width, so this cannot fail.
        Scalar::read_from(&mut slice, ty).expect("cell slice matches scalar width")
    }

    /// Integer view of one cell.
    pub fn get_i32(&self, row: usize, col: usize) -> i32 {
        self.get(row, col).as_i64() as i32
    }

    /// Floating point view of one cell.
    pub fn get_f64(&self, row: usize, col: usize) -> f64 {
        self.get(row, col).as_f64()
    }
}

#[derive(Debug)]
pub enum MatrixError {
    /// Column name occurs twice within one header.
    DuplicateColumn { name: String },

    /// Number of header columns does not match the columns implied by the
    /// row data.
    ColumnCountMismatch { header: usize, data: usize },

    /// Raw row data does not contain `rows × stride` bytes.
    SizeMismatch { expected: usize, actual: usize },

    /// A cell value does not match the declared column type.
    CellTypeMismatch { column: String, expected: ScalarType, found: ScalarType },

    /// Unknown scalar type code in a decoded header.
    UnknownScalarType { raw: u32 },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MatrixError::*;
        match self {
            DuplicateColumn { name } =>
                write!(f, "duplicate column name \"{}\"", name),
            ColumnCountMismatch { header, data } =>
                write!(f, "header declares {} columns but row data implies {}", header, data),
            SizeMismatch { expected, actual } =>
                write!(f, "row data size mismatch: expected {} bytes, got {}", expected, actual),
            CellTypeMismatch { column, expected, found } =>
                write!(f, "column \"{}\" expects {} values, got {}", column, expected, found),
            UnknownScalarType { raw } =>
                write!(f, "unknown scalar type code: {}",
                    crate::types::enum_name_or_hex::<crate::types::ScalarType>(*raw)),
        }
    }
}

impl std::error::Error for MatrixError {}
