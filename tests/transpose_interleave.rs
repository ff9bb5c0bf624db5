//! End-to-end checks of the transform surface: reference layouts, padding
//! invariants, type conversion, row sums, and the dispatch table.

use half::{bf16, f16};
use tilepack_kernels::{
    interleaved_dst_len, pack_interleaved, pack_interleaved_sums, pack_transposed,
    pack_transposed_par, transposed_dst_len, DType, TransformKey, Transformer,
};

/// Inverse gather over the transposed tile layout: element (row, col) of the
/// window lives at `(col / INT_BY) * k * INT_BY + row * INT_BY + col % INT_BY`.
fn gather_transposed<const INT_BY: usize, T: Copy>(
    tile: &[T],
    rows: usize,
    cols: usize,
) -> Vec<T> {
    let ldout = rows * INT_BY;
    let mut out = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            out.push(tile[(c / INT_BY) * ldout + r * INT_BY + c % INT_BY]);
        }
    }
    out
}

#[test]
fn reference_scenario_2x6_u16() {
    let src: [u16; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
    let mut tile = vec![0u16; transposed_dst_len::<4>(0, 6, 0, 2)];

    pack_transposed::<4, u16, u16>(&mut tile, &src, 6, 0, 6, 0, 2);

    assert_eq!(&tile[..8], &[1, 2, 3, 4, 7, 8, 9, 10]);
    assert_eq!(&tile[8..], &[5, 6, 0, 0, 11, 12, 0, 0]);
}

#[test]
fn round_trip_restores_source() {
    let rows = 7;
    let cols = 29;
    let src: Vec<u32> = (0..rows * cols).map(|v| v as u32 * 3 + 1).collect();

    let mut tile = vec![0u32; transposed_dst_len::<12>(0, cols, 0, rows)];
    pack_transposed::<12, u32, u32>(&mut tile, &src, cols, 0, cols, 0, rows);

    assert_eq!(gather_transposed::<12, u32>(&tile, rows, cols), src);
}

#[test]
fn zero_padding_fills_every_row_of_the_ragged_block() {
    let rows = 6;
    let cols = 10; // overflow = 2 at IntBy 4
    let src: Vec<i16> = (0..rows * cols).map(|v| v as i16 + 1).collect();

    let mut tile = vec![-1i16; transposed_dst_len::<4>(0, cols, 0, rows)];
    pack_transposed::<4, i16, i16>(&mut tile, &src, cols, 0, cols, 0, rows);

    let ldout = rows * 4;
    let ragged = &tile[(cols / 4) * ldout..];
    for r in 0..rows {
        assert_eq!(&ragged[r * 4 + 2..r * 4 + 4], &[0, 0], "row {r}");
    }
    // Live lanes are the last two true columns of each row.
    for r in 0..rows {
        assert_eq!(
            &ragged[r * 4..r * 4 + 2],
            &src[r * cols + 8..r * cols + 10],
            "row {r}"
        );
    }
}

#[test]
fn widening_u8_to_u16_is_bit_exact() {
    let src: Vec<u8> = (0..64).map(|v| (v * 4 + 3) as u8).collect();
    let mut tile = vec![0u16; transposed_dst_len::<16>(0, 16, 0, 4)];

    pack_transposed::<16, u8, u16>(&mut tile, &src, 16, 0, 16, 0, 4);

    let back = gather_transposed::<16, u16>(&tile, 4, 16);
    for (wide, narrow) in back.iter().zip(src.iter()) {
        assert_eq!(*wide, u16::from(*narrow));
    }
}

#[test]
fn f16_to_f32_promotion_is_exact() {
    let vals = [0.5f32, -1.25, 3.0, 65504.0, -0.0, 0.099975586];
    let src: Vec<f16> = vals.iter().map(|&v| f16::from_f32(v)).collect();

    let mut tile = vec![0.0f32; transposed_dst_len::<4>(0, 6, 0, 1)];
    pack_transposed::<4, f16, f32>(&mut tile, &src, 6, 0, 6, 0, 1);

    let back = gather_transposed::<4, f32>(&tile, 1, 6);
    for (out, src) in back.iter().zip(src.iter()) {
        assert_eq!(*out, src.to_f32());
    }
}

#[test]
fn bf16_interleave_pads_rows() {
    let src: Vec<bf16> = (0..3 * 4).map(|v| bf16::from_f32(v as f32)).collect();
    let mut tile = vec![bf16::from_f32(9.0); interleaved_dst_len::<8, 2>(0, 3, 0, 4)];

    pack_interleaved::<8, 2, bf16, bf16>(&mut tile, &src, 4, 0, 3, 0, 4);

    // Rows 3..8 of both column groups must be zero.
    for group in 0..2 {
        let base = group * 8 * 2;
        for r in 3..8 {
            assert_eq!(tile[base + r * 2], bf16::ZERO);
            assert_eq!(tile[base + r * 2 + 1], bf16::ZERO);
        }
    }
}

#[test]
fn quantized_interleave_sums_are_scaled() {
    let rows = 8;
    let cols = 12;
    let src: Vec<i8> = (0..rows * cols).map(|v| (v % 17) as i8 - 8).collect();

    let len = tilepack_kernels::interleaved_sums_dst_len::<8, 4>(0, rows, 0, cols);
    let mut tile = vec![0i8; len];
    pack_interleaved_sums::<8, 4, i8, i8>(&mut tile, &src, cols, 0, rows, 0, cols, 3);

    let data_len = interleaved_dst_len::<8, 4>(0, rows, 0, cols);
    let sums_bytes: Vec<u8> = tile[data_len..].iter().map(|&b| b as u8).collect();
    for r in 0..rows {
        let expect: i32 = src[r * cols..(r + 1) * cols].iter().map(|&v| v as i32).sum();
        let got = i32::from_ne_bytes(sums_bytes[r * 4..r * 4 + 4].try_into().unwrap());
        assert_eq!(got, expect * 3, "row {r}");
    }
}

#[test]
fn dispatch_runs_the_same_kernel_as_the_typed_api() {
    let rows = 5;
    let cols = 26;
    let src: Vec<f16> = (0..rows * cols)
        .map(|v| f16::from_f32(v as f32 * 0.25))
        .collect();

    let len = transposed_dst_len::<24>(0, cols, 0, rows);
    let mut direct = vec![f16::ZERO; len];
    pack_transposed::<24, f16, f16>(&mut direct, &src, cols, 0, cols, 0, rows);

    let tf = Transformer::new(TransformKey::transposed(24, 1, DType::F16, DType::F16))
        .expect("f16 transform registered");
    let mut erased = vec![f16::ZERO; len];
    unsafe {
        tf.run(
            erased.as_mut_ptr().cast(),
            src.as_ptr().cast(),
            cols,
            0,
            cols,
            0,
            rows,
        );
    }

    assert_eq!(direct, erased);
}

#[test]
fn parallel_packing_is_equivalent() {
    let rows = 13;
    let cols = 101;
    let src: Vec<f32> = (0..rows * cols).map(|v| v as f32 * 0.5 - 7.0).collect();

    let len = transposed_dst_len::<12>(0, cols, 0, rows);
    let mut seq = vec![0.0f32; len];
    let mut par = vec![0.0f32; len];

    pack_transposed::<12, f32, f32>(&mut seq, &src, cols, 0, cols, 0, rows);
    pack_transposed_par::<12, f32, f32>(&mut par, &src, cols, 0, cols, 0, rows);

    assert_eq!(seq, par);
}
