use std::borrow::Cow;

use wabi_nodes::{Type, ValType};

use crate::parser::types::FUNC_TYPE_FORM;

use super::Encode;

static NULLARY: [u8; 3] = [FUNC_TYPE_FORM, 0, 0];

// Indexed by `slot`.
static ONE_PARAM: [[u8; 4]; 4] = [
    [FUNC_TYPE_FORM, 1, ValType::I32 as u8, 0],
    [FUNC_TYPE_FORM, 1, ValType::I64 as u8, 0],
    [FUNC_TYPE_FORM, 1, ValType::F32 as u8, 0],
    [FUNC_TYPE_FORM, 1, ValType::F64 as u8, 0],
];

static ONE_RESULT: [[u8; 4]; 4] = [
    [FUNC_TYPE_FORM, 0, 1, ValType::I32 as u8],
    [FUNC_TYPE_FORM, 0, 1, ValType::I64 as u8],
    [FUNC_TYPE_FORM, 0, 1, ValType::F32 as u8],
    [FUNC_TYPE_FORM, 0, 1, ValType::F64 as u8],
];

fn slot(ty: ValType) -> usize {
    match ty {
        ValType::I32 => 0,
        ValType::I64 => 1,
        ValType::F32 => 2,
        ValType::F64 => 3,
    }
}

/// Look up a precomputed encoding for the nullary, single-param and
/// single-result signatures.
pub(crate) fn cached_func_type(ty: &Type) -> Option<&'static [u8]> {
    match (&*ty.params, &*ty.results) {
        ([], []) => Some(&NULLARY),
        ([param], []) => Some(&ONE_PARAM[slot(*param)]),
        ([], [result]) => Some(&ONE_RESULT[slot(*result)]),
        _ => None,
    }
}

/// Encode a function type as `[0x60][vec(params)][vec(results)]`.
///
/// Multi-result types are written as-is; rejecting them is up to validation.
pub fn encode_func_type_uncached(ty: &Type) -> Vec<u8> {
    let mut out = Vec::with_capacity(3 + ty.params.len() + ty.results.len());
    out.push(FUNC_TYPE_FORM);
    ty.params[..].encode(&mut out);
    ty.results[..].encode(&mut out);
    out
}

pub fn encode_func_type(ty: &Type) -> Cow<'static, [u8]> {
    match cached_func_type(ty) {
        Some(bytes) => Cow::Borrowed(bytes),
        None => Cow::Owned(encode_func_type_uncached(ty)),
    }
}

impl Encode for Type {
    fn encode(&self, sink: &mut Vec<u8>) {
        sink.extend_from_slice(&encode_func_type(self));
    }
}
