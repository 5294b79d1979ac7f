pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
mod mock_api;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_select, assert_hx_endpoint,
    must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{
    assert_content_type, assert_hx_redirect, assert_status_ok, get_header, response_text,
    session_jar,
};
pub(crate) use mock_api::{MockApi, TEST_PASSWORD, TEST_TOKEN, TEST_USERNAME, test_session};
