// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! One id or many

/// Anything that names one or more modules
pub trait IntoIds {
    /// Convert into an ordered list of ids
    fn into_ids(self) -> Vec<String>;
}

impl IntoIds for &str {
    fn into_ids(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoIds for String {
    fn into_ids(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoIds for &String {
    fn into_ids(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl IntoIds for Vec<String> {
    fn into_ids(self) -> Vec<String> {
        self
    }
}

impl IntoIds for Vec<&str> {
    fn into_ids(self) -> Vec<String> {
        self.into_iter().map(String::from).collect()
    }
}

impl IntoIds for &[&str] {
    fn into_ids(self) -> Vec<String> {
        self.iter().map(|id| id.to_string()).collect()
    }
}

impl IntoIds for &[String] {
    fn into_ids(self) -> Vec<String> {
        self.to_vec()
    }
}

impl<const N: usize> IntoIds for [&str; N] {
    fn into_ids(self) -> Vec<String> {
        self.iter().map(|id| id.to_string()).collect()
    }
}
