macro_rules! bitpos {
    ($idx:expr) => {{
        let idx = $idx;
        (idx >> 6, idx & 63)
    }};
}

macro_rules! fill {
    ($sign:expr) => {{
        if $sign { !0u64 } else { 0u64 }
    }};
}

pub(crate) use bitpos;
pub(crate) use fill;
