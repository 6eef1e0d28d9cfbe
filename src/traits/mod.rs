/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits

*/

mod word;
pub use word::*;

mod integral;
pub use integral::*;

mod storage;
pub use storage::*;

mod bit_stream;
pub use bit_stream::*;
