// Copyright 2026 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Tuning knobs for multi-scalar multiplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MsmConfig {
    /// Maximum number of chunks the generic MSM path is split into. `0` uses every thread of the
    /// global rayon pool.
    pub tasks: usize,
}

impl MsmConfig {
    pub const fn new(tasks: usize) -> Self {
        Self { tasks }
    }

    /// Resolves the parallelism hint into a concrete, nonzero task count.
    pub fn effective_tasks(&self) -> usize {
        match self.tasks {
            0 => rayon::current_num_threads().max(1),
            n => n,
        }
    }
}
