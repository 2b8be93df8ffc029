//! Zero-Cost Safety Macros
//!
//! Texel reads in the stencil passes are the hottest loads of the engine.
//! Every index handed to these macros has already been clamped to the field
//! (clamp-to-edge addressing), so release builds skip the bounds check.
//!
//! In Debug mode: Normal bounds-checked access (panics with useful errors)
//! In Release mode: Unsafe unchecked access (zero overhead)
//!
//! Usage:
//! ```rust
//! use dyeflow_engine::fast;
//!
//! let texels = vec![0.5f32, 1.0, 2.0, 4.0];
//! let idx = 2;
//! // Read: fast!(slice, [index])
//! let val = *fast!(texels, [idx]);
//! assert_eq!(val, 2.0);
//!
//! let mut pressure = vec![0.0f32; 4];
//! // Write: fast!(slice, [index] = value)
//! fast!(pressure, [idx] = 0.25);
//! assert_eq!(pressure[idx], 0.25);
//! ```

/// Zero-cost bounds checking macro
///
/// - Debug: Uses normal indexing with bounds checks
/// - Release: Uses get_unchecked/get_unchecked_mut
#[macro_export]
macro_rules! fast {
    // Read pattern: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            // Callers clamp indices to the field before reading.
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write pattern: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn fast_read_returns_texel() {
        let texels = vec![0.0f32, 0.25, 0.5, 0.75];
        assert_eq!(*fast!(texels, [3]), 0.75);
    }

    #[test]
    fn fast_write_stores_texel() {
        let mut texels = vec![0.0f32; 4];
        fast!(texels, [1] = 0.5);
        assert_eq!(texels[1], 0.5);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn fast_read_out_of_field_panics_in_debug() {
        let texels = vec![0.0f32; 4];
        let _ = *fast!(texels, [4]);
    }
}
