// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use super::ChainError;
use crate::payload::{CallIndex, CallIndexTable, CallName};
use crate::utils::decode_hex;
use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed};
use parity_scale_codec::Decode;
use scale_info::{PortableRegistry, TypeDef};

/// What the payload builders need from the runtime metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSummary {
    pub calls: CallIndexTable,
    pub extrinsic_version: u8,
}

struct PalletCalls<'a> {
    name: &'a str,
    index: u8,
    calls_ty: Option<u32>,
}

pub fn decode_metadata_hex(metadata_hex: &str) -> Result<RuntimeSummary, ChainError> {
    let bytes = decode_hex(metadata_hex).map_err(|e| ChainError::InvalidResponse {
        method: "state_getMetadata",
        reason: e.to_string(),
    })?;
    let metadata = RuntimeMetadataPrefixed::decode(&mut &bytes[..]).map_err(|e| {
        ChainError::InvalidResponse {
            method: "state_getMetadata",
            reason: e.to_string(),
        }
    })?;
    summarize(&metadata)
}

pub fn summarize(metadata: &RuntimeMetadataPrefixed) -> Result<RuntimeSummary, ChainError> {
    let (registry, pallets, extrinsic_version): (&PortableRegistry, Vec<PalletCalls<'_>>, u8) =
        match &metadata.1 {
            RuntimeMetadata::V14(m) => (
                &m.types,
                m.pallets
                    .iter()
                    .map(|p| PalletCalls {
                        name: p.name.as_str(),
                        index: p.index,
                        calls_ty: p.calls.as_ref().map(|c| c.ty.id),
                    })
                    .collect(),
                m.extrinsic.version,
            ),
            RuntimeMetadata::V15(m) => (
                &m.types,
                m.pallets
                    .iter()
                    .map(|p| PalletCalls {
                        name: p.name.as_str(),
                        index: p.index,
                        calls_ty: p.calls.as_ref().map(|c| c.ty.id),
                    })
                    .collect(),
                m.extrinsic.version,
            ),
            _ => return Err(ChainError::UnsupportedMetadata),
        };

    let mut calls = CallIndexTable::new();
    for name in CallName::ALL {
        if let Some(index) = find_call(registry, &pallets, name) {
            calls.insert(name, index);
        }
    }

    if calls.is_empty() {
        return Err(ChainError::InvalidResponse {
            method: "state_getMetadata",
            reason: "runtime exposes none of the supported calls".to_string(),
        });
    }

    Ok(RuntimeSummary {
        calls,
        extrinsic_version,
    })
}

fn find_call(
    registry: &PortableRegistry,
    pallets: &[PalletCalls<'_>],
    name: CallName,
) -> Option<CallIndex> {
    let pallet = pallets.iter().find(|p| p.name == name.pallet())?;
    let ty = registry.resolve(pallet.calls_ty?)?;
    let TypeDef::Variant(variants) = &ty.type_def else {
        return None;
    };

    name.candidates().iter().find_map(|candidate| {
        variants
            .variants
            .iter()
            .find(|v| v.name == *candidate)
            .map(|v| CallIndex {
                pallet: pallet.index,
                call: v.index,
            })
    })
}
