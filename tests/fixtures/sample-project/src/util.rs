// SPDX-License-Identifier: Apache-2.0 OR MIT
pub fn double(value: u32) -> u32 {
    value * 2
}
